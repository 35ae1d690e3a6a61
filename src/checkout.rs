//! Checkout trigger for the landing and success pages.
//!
//! Independent of the onboarding form: it neither gates nor is gated by the
//! submission flow. The hosted payment page does all the work; this side only
//! navigates.

use crate::config::AppConfig;
use crate::controller::Navigator;

/// Redirects to the configured hosted payment page.
pub fn redirect_to_payment(config: &AppConfig, navigator: &mut dyn Navigator) {
    tracing::info!(url = %config.payment_link_url, "redirecting to payment link");
    navigator.navigate(&config.payment_link_url);
}
