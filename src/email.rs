//! Outbound notification emails: an admin notification and a customer
//! acknowledgment, each best-effort and independent of the other.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::config::EmailConfig;
use crate::errors::NotifyError;
use crate::schema;
use crate::values::FormValues;

/// Flattened key/value pairs handed to a message template.
pub type TemplateParams = BTreeMap<&'static str, String>;

/// Delivery seam for the hosted email service.
pub trait EmailTransport {
    fn send(&mut self, template_id: &str, params: &TemplateParams) -> Result<(), NotifyError>;
}

impl<T: EmailTransport + ?Sized> EmailTransport for &mut T {
    fn send(&mut self, template_id: &str, params: &TemplateParams) -> Result<(), NotifyError> {
        (**self).send(template_id, params)
    }
}

/// Flattens the full value set into the template parameter layout, with
/// placeholder text for unanswered optional fields and submission metadata.
pub fn template_params(values: &FormValues, now: DateTime<Utc>) -> TemplateParams {
    let or_placeholder = |key: &str, placeholder: &str| {
        let value = values.trimmed(key);
        if value.is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        }
    };

    let mut params = TemplateParams::new();
    params.insert("customer_name", values.trimmed(schema::FULL_NAME).into());
    params.insert("customer_email", values.trimmed(schema::EMAIL).into());
    params.insert("customer_location", values.trimmed(schema::LOCATION).into());

    params.insert("business_status", values.trimmed(schema::BUSINESS_STATUS).into());
    params.insert(
        "business_idea",
        or_placeholder(schema::BUSINESS_IDEA_DESCRIPTION, "Not provided"),
    );

    params.insert("natural_skills", values.trimmed(schema::NATURAL_SKILLS).into());
    params.insert(
        "interests_passions",
        values.trimmed(schema::INTERESTS_PASSIONS).into(),
    );
    params.insert(
        "external_validation",
        values.trimmed(schema::EXTERNAL_VALIDATION).into(),
    );
    params.insert(
        "relevant_experience",
        or_placeholder(schema::RELEVANT_EXPERIENCE, "Not provided"),
    );

    params.insert("main_goal", values.trimmed(schema::MAIN_GOAL).into());
    params.insert(
        "main_goal_other",
        or_placeholder(schema::MAIN_GOAL_OTHER, "Not applicable"),
    );
    params.insert(
        "biggest_challenge",
        values.trimmed(schema::BIGGEST_CHALLENGE).into(),
    );
    params.insert(
        "biggest_challenge_other",
        or_placeholder(schema::BIGGEST_CHALLENGE_OTHER, "Not applicable"),
    );
    params.insert("ideal_outcome", values.trimmed(schema::IDEAL_OUTCOME).into());
    params.insert("motivation", values.trimmed(schema::MOTIVATION).into());

    params.insert(
        "background_story",
        values.trimmed(schema::BACKGROUND_STORY).into(),
    );
    params.insert(
        "achievements",
        or_placeholder(schema::ACHIEVEMENTS, "Not provided"),
    );
    params.insert(
        "additional_notes",
        or_placeholder(schema::ADDITIONAL_NOTES, "None"),
    );

    params.insert(
        "submission_date",
        now.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    params.insert(
        "formatted_date",
        now.format("%A, %B %-d, %Y at %H:%M").to_string(),
    );
    params
}

/// Sends the two onboarding templates through a transport.
pub struct Mailer<'a, T: EmailTransport> {
    config: &'a EmailConfig,
    transport: T,
}

impl<'a, T: EmailTransport> Mailer<'a, T> {
    pub fn new(config: &'a EmailConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn send_admin_notification(
        &mut self,
        values: &FormValues,
        now: DateTime<Utc>,
    ) -> Result<(), NotifyError> {
        if self.config.service_id.is_empty() || self.config.admin_template_id.is_empty() {
            tracing::warn!("email configuration missing for admin notification, skipping");
            return Err(NotifyError::MissingConfig("admin notification"));
        }
        let mut params = template_params(values, now);
        params.insert("admin_email", self.config.admin_email.clone());
        params.insert("admin_name", self.config.admin_name.clone());
        let template_id = self.config.admin_template_id.clone();
        self.transport.send(&template_id, &params)
    }

    pub fn send_customer_acknowledgment(
        &mut self,
        values: &FormValues,
        now: DateTime<Utc>,
    ) -> Result<(), NotifyError> {
        if self.config.service_id.is_empty() || self.config.customer_template_id.is_empty() {
            tracing::warn!("email configuration missing for customer acknowledgment, skipping");
            return Err(NotifyError::MissingConfig("customer acknowledgment"));
        }
        let mut params = template_params(values, now);
        params.insert("to_email", values.trimmed(schema::EMAIL).to_string());
        params.insert("to_name", values.trimmed(schema::FULL_NAME).to_string());
        let template_id = self.config.customer_template_id.clone();
        self.transport.send(&template_id, &params)
    }

    /// Dispatches both templates. Each is independently best-effort; a
    /// failure is logged and never propagated, so notification problems can
    /// not block the submission flow.
    pub fn send_onboarding_emails(&mut self, values: &FormValues, now: DateTime<Utc>) {
        if let Err(err) = self.send_admin_notification(values, now) {
            tracing::warn!(error = %err, "admin notification not sent");
        }
        if let Err(err) = self.send_customer_acknowledgment(values, now) {
            tracing::warn!(error = %err, "customer acknowledgment not sent");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> EmailConfig {
        EmailConfig {
            service_id: "service_1".into(),
            admin_template_id: "tmpl_admin".into(),
            customer_template_id: "tmpl_customer".into(),
            public_key: "pk".into(),
            admin_email: "owner@example.com".into(),
            admin_name: "Owner".into(),
        }
    }

    fn sample_values() -> FormValues {
        let mut values = FormValues::empty(schema::onboarding());
        values.set(schema::FULL_NAME, "Ada Lovelace");
        values.set(schema::EMAIL, "ada@example.com");
        values.set(schema::LOCATION, "London, UK");
        values.set(schema::BUSINESS_STATUS, "starting-from-scratch");
        values
    }

    #[derive(Default)]
    struct RecordingTransport {
        sent: Vec<(String, TemplateParams)>,
        fail_templates: Vec<String>,
    }

    impl EmailTransport for RecordingTransport {
        fn send(&mut self, template_id: &str, params: &TemplateParams) -> Result<(), NotifyError> {
            if self.fail_templates.iter().any(|t| t == template_id) {
                return Err(NotifyError::Transport("boom".into()));
            }
            self.sent.push((template_id.to_string(), params.clone()));
            Ok(())
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 14, 30, 0).unwrap()
    }

    #[test]
    fn params_flatten_values_with_placeholders() {
        let params = template_params(&sample_values(), fixed_now());
        assert_eq!(params["customer_name"], "Ada Lovelace");
        assert_eq!(params["business_idea"], "Not provided");
        assert_eq!(params["main_goal_other"], "Not applicable");
        assert_eq!(params["additional_notes"], "None");
        assert_eq!(params["submission_date"], "2025-06-02 14:30:00 UTC");
        assert_eq!(params["formatted_date"], "Monday, June 2, 2025 at 14:30");
    }

    #[test]
    fn both_templates_are_sent_with_their_recipients() {
        let cfg = config();
        let mut mailer = Mailer::new(&cfg, RecordingTransport::default());
        mailer.send_onboarding_emails(&sample_values(), fixed_now());

        let sent = &mailer.transport.sent;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "tmpl_admin");
        assert_eq!(sent[0].1["admin_email"], "owner@example.com");
        assert_eq!(sent[1].0, "tmpl_customer");
        assert_eq!(sent[1].1["to_email"], "ada@example.com");
        assert_eq!(sent[1].1["to_name"], "Ada Lovelace");
    }

    #[test]
    fn missing_config_skips_without_sending() {
        let mut cfg = config();
        cfg.service_id = String::new();
        let mut mailer = Mailer::new(&cfg, RecordingTransport::default());
        mailer.send_onboarding_emails(&sample_values(), fixed_now());
        assert!(mailer.transport.sent.is_empty());
    }

    #[test]
    fn admin_failure_does_not_block_customer_send() {
        let cfg = config();
        let transport = RecordingTransport {
            fail_templates: vec!["tmpl_admin".into()],
            ..Default::default()
        };
        let mut mailer = Mailer::new(&cfg, transport);
        mailer.send_onboarding_emails(&sample_values(), fixed_now());
        assert_eq!(mailer.transport.sent.len(), 1);
        assert_eq!(mailer.transport.sent[0].0, "tmpl_customer");
    }
}
