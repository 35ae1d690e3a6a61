#![doc(test(attr(deny(warnings))))]

//! Onboarding Core implements the form engine behind the business-blueprint
//! onboarding portal: the declarative field schema, validation, progress
//! tracking, draft persistence, and submission orchestration. Presentation,
//! routing, and the hosted payment page are external collaborators reached
//! through the trait seams in [`controller`], [`submit`], and [`email`].

pub mod checkout;
pub mod config;
pub mod controller;
pub mod draft;
pub mod email;
pub mod errors;
pub mod progress;
pub mod schema;
pub mod submit;
pub mod validate;
pub mod values;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("onboarding_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Onboarding Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
