//! Completion percentage for the onboarding form.

use crate::schema::Schema;
use crate::values::FormValues;

/// `round(100 * filled / total)`, where "filled" means a non-blank trimmed
/// value and the denominator is the full declared field count. Conditional
/// fields count toward the denominator whether or not they are visible, so
/// progress is not strictly monotonic across edit sequences that reveal them.
pub fn progress(schema: &Schema, values: &FormValues) -> u8 {
    let total = schema.len();
    if total == 0 {
        return 0;
    }
    let filled = schema
        .fields()
        .iter()
        .filter(|field| !values.is_blank(field.key))
        .count();
    ((filled as f64 / total as f64) * 100.0).round() as u8
}
