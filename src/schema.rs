//! Declarative description of the onboarding form.
//!
//! The field set, conditional rules, and validation rules are fixed and
//! product-specific. Each definition colocates its requirement predicate and
//! its validation rule with the field, so the validator stays generic and the
//! per-field copy lives in one place.

use once_cell::sync::Lazy;

use crate::values::FormValues;

pub const FULL_NAME: &str = "fullName";
pub const EMAIL: &str = "email";
pub const LOCATION: &str = "location";
pub const BUSINESS_STATUS: &str = "businessStatus";
pub const BUSINESS_IDEA_DESCRIPTION: &str = "businessIdeaDescription";
pub const NATURAL_SKILLS: &str = "naturalSkills";
pub const INTERESTS_PASSIONS: &str = "interestsPassions";
pub const EXTERNAL_VALIDATION: &str = "externalValidation";
pub const RELEVANT_EXPERIENCE: &str = "relevantExperience";
pub const MAIN_GOAL: &str = "mainGoal";
pub const MAIN_GOAL_OTHER: &str = "mainGoalOther";
pub const BIGGEST_CHALLENGE: &str = "biggestChallenge";
pub const BIGGEST_CHALLENGE_OTHER: &str = "biggestChallengeOther";
pub const IDEAL_OUTCOME: &str = "idealOutcome";
pub const MOTIVATION: &str = "motivation";
pub const BACKGROUND_STORY: &str = "backgroundStory";
pub const ACHIEVEMENTS: &str = "achievements";
pub const ADDITIONAL_NOTES: &str = "additionalNotes";

pub const HAVE_IDEA_NOT_STARTED: &str = "have-idea-not-started";
pub const OTHER: &str = "other";

pub const BUSINESS_STATUS_OPTIONS: &[&str] = &[
    HAVE_IDEA_NOT_STARTED,
    "started-but-stuck",
    "starting-from-scratch",
];

pub const MAIN_GOAL_OPTIONS: &[&str] = &[
    "side-income-1k",
    "replace-job-income",
    "long-term-freedom",
    OTHER,
];

pub const BIGGEST_CHALLENGE_OPTIONS: &[&str] = &[
    "business-model-choice",
    "focus-priority",
    "overwhelmed-options",
    "tried-nothing-worked",
    OTHER,
];

/// Supported data kinds for form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    LongText,
    SingleSelect,
}

/// A predicate over the current value set: another field equals a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub field: &'static str,
    pub equals: &'static str,
}

impl Condition {
    pub fn holds(&self, values: &FormValues) -> bool {
        values.get(self.field) == self.equals
    }
}

/// When a field must carry a non-empty value.
#[derive(Debug, Clone)]
pub enum Requirement {
    Always { message: &'static str },
    Optional,
    When { condition: Condition, message: &'static str },
}

impl Requirement {
    pub fn is_required(&self, values: &FormValues) -> bool {
        match self {
            Requirement::Always { .. } => true,
            Requirement::Optional => false,
            Requirement::When { condition, .. } => condition.holds(values),
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Requirement::Always { message } | Requirement::When { message, .. } => Some(message),
            Requirement::Optional => None,
        }
    }
}

/// Validation applied to a non-empty value.
#[derive(Debug, Clone)]
pub enum FieldRule {
    None,
    Length {
        min: usize,
        max: usize,
        too_short: &'static str,
        too_long: &'static str,
    },
    MaxLength {
        max: usize,
        too_long: &'static str,
    },
    EmailAddress {
        invalid: &'static str,
    },
    OneOf {
        options: &'static [&'static str],
        invalid: &'static str,
    },
}

/// Declarative description of a single form field.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
    pub rule: FieldRule,
    /// `None` means always visible; conditional fields share their
    /// requirement condition.
    pub visibility: Option<Condition>,
}

impl FieldDefinition {
    pub fn is_visible(&self, values: &FormValues) -> bool {
        self.visibility.map_or(true, |cond| cond.holds(values))
    }
}

/// The fixed, ordered field schema.
#[derive(Debug)]
pub struct Schema {
    fields: Vec<FieldDefinition>,
}

impl Schema {
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields whose visibility predicate holds, in schema order.
    pub fn visible_fields<'a>(
        &'a self,
        values: &'a FormValues,
    ) -> impl Iterator<Item = &'a FieldDefinition> {
        self.fields.iter().filter(|field| field.is_visible(values))
    }

    /// Structural self-check: condition targets must be declared fields that
    /// appear earlier in schema order, keys must be unique, and conditional
    /// fields are never unconditionally required.
    pub fn verify(&self) -> Result<(), String> {
        let mut seen: Vec<&str> = Vec::new();
        for field in &self.fields {
            if seen.contains(&field.key) {
                return Err(format!("duplicate field key `{}`", field.key));
            }
            let conditions = [
                field.visibility,
                match field.requirement {
                    Requirement::When { condition, .. } => Some(condition),
                    _ => None,
                },
            ];
            for condition in conditions.into_iter().flatten() {
                if !seen.contains(&condition.field) {
                    return Err(format!(
                        "field `{}` depends on `{}`, which is not declared before it",
                        field.key, condition.field
                    ));
                }
            }
            if field.visibility.is_some()
                && matches!(field.requirement, Requirement::Always { .. })
            {
                return Err(format!(
                    "conditional field `{}` must not be unconditionally required",
                    field.key
                ));
            }
            seen.push(field.key);
        }
        Ok(())
    }
}

static ONBOARDING: Lazy<Schema> = Lazy::new(|| {
    let idea_condition = Condition {
        field: BUSINESS_STATUS,
        equals: HAVE_IDEA_NOT_STARTED,
    };
    let goal_other_condition = Condition {
        field: MAIN_GOAL,
        equals: OTHER,
    };
    let challenge_other_condition = Condition {
        field: BIGGEST_CHALLENGE,
        equals: OTHER,
    };

    Schema {
        fields: vec![
            FieldDefinition {
                key: FULL_NAME,
                label: "Full Name",
                kind: FieldKind::Text,
                requirement: Requirement::Always {
                    message: "Full name is required",
                },
                rule: FieldRule::Length {
                    min: 2,
                    max: 100,
                    too_short: "Full name must be at least 2 characters",
                    too_long: "Full name must be less than 100 characters",
                },
                visibility: None,
            },
            FieldDefinition {
                key: EMAIL,
                label: "Email Address",
                kind: FieldKind::Email,
                requirement: Requirement::Always {
                    message: "Email address is required",
                },
                rule: FieldRule::EmailAddress {
                    invalid: "Please enter a valid email address",
                },
                visibility: None,
            },
            FieldDefinition {
                key: LOCATION,
                label: "Where are you based? (City & Country)",
                kind: FieldKind::Text,
                requirement: Requirement::Always {
                    message: "Location is required",
                },
                rule: FieldRule::Length {
                    min: 2,
                    max: 100,
                    too_short: "Location must be at least 2 characters",
                    too_long: "Location must be less than 100 characters",
                },
                visibility: None,
            },
            FieldDefinition {
                key: BUSINESS_STATUS,
                label: "Do you already have a business idea or are you starting from scratch?",
                kind: FieldKind::SingleSelect,
                requirement: Requirement::Always {
                    message: "Business status is required",
                },
                rule: FieldRule::OneOf {
                    options: BUSINESS_STATUS_OPTIONS,
                    invalid: "Please select a valid business status",
                },
                visibility: None,
            },
            FieldDefinition {
                key: BUSINESS_IDEA_DESCRIPTION,
                label: "If you have an idea, briefly describe it here.",
                kind: FieldKind::LongText,
                requirement: Requirement::When {
                    condition: idea_condition,
                    message: "Please describe your business idea",
                },
                rule: FieldRule::None,
                visibility: Some(idea_condition),
            },
            FieldDefinition {
                key: NATURAL_SKILLS,
                label: "What are you naturally good at?",
                kind: FieldKind::LongText,
                requirement: Requirement::Always {
                    message: "Natural skills are required",
                },
                rule: FieldRule::Length {
                    min: 10,
                    max: 1000,
                    too_short: "Please provide more detail about your natural skills",
                    too_long: "Skills description must be less than 1000 characters",
                },
                visibility: None,
            },
            FieldDefinition {
                key: INTERESTS_PASSIONS,
                label: "What are your interests/passions?",
                kind: FieldKind::LongText,
                requirement: Requirement::Always {
                    message: "Interests and passions are required",
                },
                rule: FieldRule::Length {
                    min: 10,
                    max: 1000,
                    too_short: "Please provide more detail about your interests",
                    too_long: "Interests description must be less than 1000 characters",
                },
                visibility: None,
            },
            FieldDefinition {
                key: EXTERNAL_VALIDATION,
                label: "What do people come to you for help with?",
                kind: FieldKind::LongText,
                requirement: Requirement::Always {
                    message: "External validation is required",
                },
                rule: FieldRule::Length {
                    min: 10,
                    max: 1000,
                    too_short: "Please provide more detail about external validation",
                    too_long: "External validation must be less than 1000 characters",
                },
                visibility: None,
            },
            FieldDefinition {
                key: RELEVANT_EXPERIENCE,
                label: "What relevant experience do you have?",
                kind: FieldKind::LongText,
                requirement: Requirement::Optional,
                rule: FieldRule::MaxLength {
                    max: 1000,
                    too_long: "Experience description must be less than 1000 characters",
                },
                visibility: None,
            },
            FieldDefinition {
                key: MAIN_GOAL,
                label: "What's your main goal with this business?",
                kind: FieldKind::SingleSelect,
                requirement: Requirement::Always {
                    message: "Main goal is required",
                },
                rule: FieldRule::OneOf {
                    options: MAIN_GOAL_OPTIONS,
                    invalid: "Please select a valid goal",
                },
                visibility: None,
            },
            FieldDefinition {
                key: MAIN_GOAL_OTHER,
                label: "Please describe your main goal",
                kind: FieldKind::Text,
                requirement: Requirement::When {
                    condition: goal_other_condition,
                    message: "Please specify your main goal",
                },
                rule: FieldRule::None,
                visibility: Some(goal_other_condition),
            },
            FieldDefinition {
                key: BIGGEST_CHALLENGE,
                label: "What's your biggest challenge right now?",
                kind: FieldKind::SingleSelect,
                requirement: Requirement::Always {
                    message: "Biggest challenge is required",
                },
                rule: FieldRule::OneOf {
                    options: BIGGEST_CHALLENGE_OPTIONS,
                    invalid: "Please select a valid challenge",
                },
                visibility: None,
            },
            FieldDefinition {
                key: BIGGEST_CHALLENGE_OTHER,
                label: "Please describe your biggest challenge",
                kind: FieldKind::Text,
                requirement: Requirement::When {
                    condition: challenge_other_condition,
                    message: "Please specify your biggest challenge",
                },
                rule: FieldRule::None,
                visibility: Some(challenge_other_condition),
            },
            FieldDefinition {
                key: IDEAL_OUTCOME,
                label: "If this business was wildly successful, what would your life look like in 12 months?",
                kind: FieldKind::LongText,
                requirement: Requirement::Always {
                    message: "Ideal outcome is required",
                },
                rule: FieldRule::Length {
                    min: 20,
                    max: 1000,
                    too_short: "Please provide more detail about your ideal outcome",
                    too_long: "Ideal outcome must be less than 1000 characters",
                },
                visibility: None,
            },
            FieldDefinition {
                key: MOTIVATION,
                label: "What's driving you to start this business?",
                kind: FieldKind::LongText,
                requirement: Requirement::Always {
                    message: "Motivation is required",
                },
                rule: FieldRule::Length {
                    min: 20,
                    max: 1000,
                    too_short: "Please provide more detail about your motivation",
                    too_long: "Motivation must be less than 1000 characters",
                },
                visibility: None,
            },
            FieldDefinition {
                key: BACKGROUND_STORY,
                label: "Tell me a bit about your background and current situation",
                kind: FieldKind::LongText,
                requirement: Requirement::Always {
                    message: "Background story is required",
                },
                rule: FieldRule::Length {
                    min: 50,
                    max: 2000,
                    too_short: "Please provide more detail about your background",
                    too_long: "Background story must be less than 2000 characters",
                },
                visibility: None,
            },
            FieldDefinition {
                key: ACHIEVEMENTS,
                label: "What are you most proud of achieving in your life so far?",
                kind: FieldKind::LongText,
                requirement: Requirement::Optional,
                rule: FieldRule::MaxLength {
                    max: 1000,
                    too_long: "Achievements must be less than 1000 characters",
                },
                visibility: None,
            },
            FieldDefinition {
                key: ADDITIONAL_NOTES,
                label: "Anything else you'd like me to know?",
                kind: FieldKind::LongText,
                requirement: Requirement::Optional,
                rule: FieldRule::MaxLength {
                    max: 1000,
                    too_long: "Additional notes must be less than 1000 characters",
                },
                visibility: None,
            },
        ],
    }
});

/// The onboarding form schema. Fixed for the lifetime of the process.
pub fn onboarding() -> &'static Schema {
    &ONBOARDING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onboarding_schema_passes_self_check() {
        onboarding().verify().expect("schema invariants");
        assert_eq!(onboarding().len(), 18);
    }

    #[test]
    fn conditional_fields_hidden_by_default() {
        let values = FormValues::empty(onboarding());
        let visible: Vec<&str> = onboarding()
            .visible_fields(&values)
            .map(|field| field.key)
            .collect();
        assert_eq!(visible.len(), 15);
        assert!(!visible.contains(&BUSINESS_IDEA_DESCRIPTION));
        assert!(!visible.contains(&MAIN_GOAL_OTHER));
        assert!(!visible.contains(&BIGGEST_CHALLENGE_OTHER));
    }

    #[test]
    fn idea_field_appears_with_matching_status() {
        let mut values = FormValues::empty(onboarding());
        values.set(BUSINESS_STATUS, HAVE_IDEA_NOT_STARTED);
        let visible: Vec<&str> = onboarding()
            .visible_fields(&values)
            .map(|field| field.key)
            .collect();
        assert!(visible.contains(&BUSINESS_IDEA_DESCRIPTION));

        values.set(BUSINESS_STATUS, "starting-from-scratch");
        assert!(!onboarding()
            .visible_fields(&values)
            .any(|field| field.key == BUSINESS_IDEA_DESCRIPTION));
    }

    #[test]
    fn other_fields_follow_their_parent_select() {
        let mut values = FormValues::empty(onboarding());
        values.set(MAIN_GOAL, OTHER);
        assert!(onboarding()
            .visible_fields(&values)
            .any(|field| field.key == MAIN_GOAL_OTHER));
        assert!(!onboarding()
            .visible_fields(&values)
            .any(|field| field.key == BIGGEST_CHALLENGE_OTHER));

        values.set(BIGGEST_CHALLENGE, OTHER);
        assert!(onboarding()
            .visible_fields(&values)
            .any(|field| field.key == BIGGEST_CHALLENGE_OTHER));
    }

    #[test]
    fn visible_fields_preserve_schema_order() {
        let mut values = FormValues::empty(onboarding());
        values.set(BUSINESS_STATUS, HAVE_IDEA_NOT_STARTED);
        let keys: Vec<&str> = onboarding()
            .visible_fields(&values)
            .map(|field| field.key)
            .collect();
        let schema_order: Vec<&str> = onboarding()
            .fields()
            .iter()
            .map(|field| field.key)
            .filter(|key| keys.contains(key))
            .collect();
        assert_eq!(keys, schema_order);
    }
}
