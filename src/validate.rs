//! Pure validation over the full value set.

use std::collections::BTreeMap;

use crate::schema::{FieldRule, Schema};
use crate::values::FormValues;

/// Field key to human-readable message. Absence of a key means the field is
/// currently valid. Recomputed whole, never patched incrementally.
pub type FormErrors = BTreeMap<&'static str, String>;

/// Validates every field against its requirement predicate and rule.
///
/// Pure function of the value set: identical inputs yield identical error
/// maps. Rules apply only to non-empty trimmed values; emptiness is judged by
/// the requirement predicate alone.
pub fn validate(schema: &Schema, values: &FormValues) -> FormErrors {
    let mut errors = FormErrors::new();
    for field in schema.fields() {
        let value = values.trimmed(field.key);
        if value.is_empty() {
            if field.requirement.is_required(values) {
                if let Some(message) = field.requirement.message() {
                    errors.insert(field.key, message.to_string());
                }
            }
            continue;
        }
        let failure = match &field.rule {
            FieldRule::None => None,
            FieldRule::Length {
                min,
                max,
                too_short,
                too_long,
            } => {
                let len = value.chars().count();
                if len < *min {
                    Some(*too_short)
                } else if len > *max {
                    Some(*too_long)
                } else {
                    None
                }
            }
            FieldRule::MaxLength { max, too_long } => {
                if value.chars().count() > *max {
                    Some(*too_long)
                } else {
                    None
                }
            }
            FieldRule::EmailAddress { invalid } => {
                if is_valid_email(value) {
                    None
                } else {
                    Some(*invalid)
                }
            }
            FieldRule::OneOf { options, invalid } => {
                if options.contains(&value) {
                    None
                } else {
                    Some(*invalid)
                }
            }
        };
        if let Some(message) = failure {
            errors.insert(field.key, message.to_string());
        }
    }
    errors
}

/// The first errored field in schema order, used to position the viewport
/// after a failed submit attempt.
pub fn first_error_key(schema: &Schema, errors: &FormErrors) -> Option<&'static str> {
    schema
        .fields()
        .iter()
        .map(|field| field.key)
        .find(|key| errors.contains_key(key))
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain with
/// non-empty labels, no whitespace.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
