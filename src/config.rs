//! Environment-backed configuration, gathered once at startup.
//!
//! Every external URL and service identifier has a hardcoded fallback so the
//! system degrades with a warning instead of crashing when configuration is
//! absent.

use std::time::Duration;

const FALLBACK_CALENDLY_URL: &str = "https://calendly.com";
const FALLBACK_PAYMENT_LINK: &str = "https://buy.stripe.com/test_eVqbJ3afA4iU6hN5ua8og00";
const FALLBACK_ADMIN_EMAIL: &str = "admin@yourdomain.com";
const FALLBACK_ADMIN_NAME: &str = "Admin Team";

const DEFAULT_SAVE_DEBOUNCE: Duration = Duration::from_secs(3);
const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);

/// Identifiers for the hosted email service and its two message templates.
/// Empty identifiers downgrade the corresponding send to a logged skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub service_id: String,
    pub admin_template_id: String,
    pub customer_template_id: String,
    pub public_key: String,
    pub admin_email: String,
    pub admin_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Follow-up call scheduling page, navigated to after a successful submit.
    pub calendly_url: String,
    /// Hosted payment page for the landing/success checkout action.
    pub payment_link_url: String,
    pub email: EmailConfig,
    pub save_debounce: Duration,
    pub submit_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            calendly_url: FALLBACK_CALENDLY_URL.into(),
            payment_link_url: FALLBACK_PAYMENT_LINK.into(),
            email: EmailConfig {
                service_id: String::new(),
                admin_template_id: String::new(),
                customer_template_id: String::new(),
                public_key: String::new(),
                admin_email: FALLBACK_ADMIN_EMAIL.into(),
                admin_name: FALLBACK_ADMIN_NAME.into(),
            },
            save_debounce: DEFAULT_SAVE_DEBOUNCE,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary lookup, which keeps the env
    /// layer testable without mutating process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fallbacks = Self::default();
        Self {
            calendly_url: read(&lookup, "CALENDLY_URL", fallbacks.calendly_url),
            payment_link_url: read(&lookup, "STRIPE_PAYMENT_LINK", fallbacks.payment_link_url),
            email: EmailConfig {
                service_id: read(&lookup, "EMAILJS_SERVICE_ID", fallbacks.email.service_id),
                admin_template_id: read(
                    &lookup,
                    "EMAILJS_TEMPLATE_ID_ADMIN",
                    fallbacks.email.admin_template_id,
                ),
                customer_template_id: read(
                    &lookup,
                    "EMAILJS_TEMPLATE_ID_CUSTOMER",
                    fallbacks.email.customer_template_id,
                ),
                public_key: read(&lookup, "EMAILJS_PUBLIC_KEY", fallbacks.email.public_key),
                admin_email: read(&lookup, "ADMIN_EMAIL", fallbacks.email.admin_email),
                admin_name: read(&lookup, "ADMIN_NAME", fallbacks.email.admin_name),
            },
            save_debounce: fallbacks.save_debounce,
            submit_timeout: fallbacks.submit_timeout,
        }
    }
}

fn read(lookup: &impl Fn(&str) -> Option<String>, name: &str, fallback: String) -> String {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            tracing::warn!(variable = name, "configuration missing, using fallback");
            fallback
        }
    }
}
