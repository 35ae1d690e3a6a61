//! Submission orchestration: the primary record step followed by best-effort
//! notification dispatch.

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::email::{EmailTransport, Mailer};
use crate::errors::SubmitError;
use crate::values::FormValues;

/// What the controller calls on a valid submit. Failure surfaces to the user
/// and blocks navigation.
pub trait Submitter {
    fn submit(&mut self, values: &FormValues) -> Result<(), SubmitError>;
}

/// The primary record step for a completed form.
pub trait SubmissionSink {
    fn record(&mut self, values: &FormValues) -> Result<(), SubmitError>;
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for &mut S {
    fn record(&mut self, values: &FormValues) -> Result<(), SubmitError> {
        (**self).record(values)
    }
}

/// Runs the sink, then dispatches the onboarding emails. Notification
/// failures are logged inside [`Mailer`] and never fail the pipeline; only
/// the sink's failure propagates.
pub struct SubmissionPipeline<'a, R: SubmissionSink, T: EmailTransport> {
    sink: R,
    mailer: Mailer<'a, T>,
    timeout: Duration,
}

impl<'a, R: SubmissionSink, T: EmailTransport> SubmissionPipeline<'a, R, T> {
    pub fn new(sink: R, mailer: Mailer<'a, T>, timeout: Duration) -> Self {
        Self {
            sink,
            mailer,
            timeout,
        }
    }
}

impl<'a, R: SubmissionSink, T: EmailTransport> Submitter for SubmissionPipeline<'a, R, T> {
    fn submit(&mut self, values: &FormValues) -> Result<(), SubmitError> {
        let started = Instant::now();
        if let Err(err) = self.sink.record(values) {
            // A sink that gave up only after the budget elapsed is
            // classified as a retryable expiry.
            let err = if started.elapsed() >= self.timeout {
                SubmitError::TimedOut
            } else {
                err
            };
            tracing::warn!(error = %err, "primary submission failed");
            return Err(err);
        }
        tracing::info!("submission recorded");
        self.mailer.send_onboarding_emails(values, Utc::now());
        Ok(())
    }
}
