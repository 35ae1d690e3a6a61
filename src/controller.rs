//! The authoritative form state machine for one page visit.
//!
//! The controller owns the value set, the touched set, and the error map. The
//! host event loop feeds it discrete events (`on_change`, `on_blur`,
//! `on_submit`) and drives its timer with `tick`; all work is serialized, so
//! validation always reads the value set as of the most recent update.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::draft::DraftStore;
use crate::progress;
use crate::schema::{self, FieldDefinition, Schema};
use crate::submit::Submitter;
use crate::validate::{self, FormErrors};
use crate::values::FormValues;

/// Banner copy for a failed primary submission.
pub const SUBMIT_ERROR_MESSAGE: &str =
    "There was an error submitting your information. Please try again.";

/// Navigation seam: redirects the page to an external destination.
pub trait Navigator {
    fn navigate(&mut self, url: &str);
}

/// Viewport seam: positions the page around validation feedback.
pub trait Viewport {
    fn scroll_to_field(&mut self, key: &str);
    fn scroll_to_top(&mut self);
}

/// Transient submission state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Error(String),
}

/// Result of one submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are now visible and the viewport was moved
    /// to the first offender.
    Invalid,
    /// The submission succeeded and navigation was triggered.
    Redirecting,
    /// The primary submission call failed; the user may retry.
    Failed,
}

/// Explicit cancel-and-reschedule timer for the debounced draft save. The
/// host drives it through the controller's `tick`; only the most recent
/// schedule ever fires.
#[derive(Debug)]
pub struct SaveDebounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl SaveDebounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn reschedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the deadline if it has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

pub struct FormController<S: DraftStore> {
    schema: &'static Schema,
    config: AppConfig,
    store: S,
    values: FormValues,
    touched: BTreeSet<String>,
    errors: FormErrors,
    submit_attempted: bool,
    status: SubmissionStatus,
    debounce: SaveDebounce,
    restored: bool,
}

impl<S: DraftStore> FormController<S> {
    /// Builds the controller and loads the persisted draft exactly once; a
    /// present, parseable snapshot fully replaces the empty initial values.
    pub fn new(config: AppConfig, store: S) -> Self {
        let schema = schema::onboarding();
        let loaded = store.load();
        let restored = loaded.is_some();
        if restored {
            tracing::info!("previous progress loaded from draft");
        }
        let debounce = SaveDebounce::new(config.save_debounce);
        Self {
            schema,
            config,
            store,
            values: loaded.unwrap_or_else(|| FormValues::empty(schema)),
            touched: BTreeSet::new(),
            errors: FormErrors::new(),
            submit_attempted: false,
            status: SubmissionStatus::Idle,
            debounce,
            restored,
        }
    }

    /// Applies an edit and reschedules the debounced draft save.
    pub fn on_change(&mut self, key: &str, value: impl Into<String>, now: Instant) {
        self.values.set(key, value);
        if self.touched.contains(key) || self.submit_attempted {
            self.errors = validate::validate(self.schema, &self.values);
        }
        self.debounce.reschedule(now);
    }

    /// Marks the field touched and revalidates, making its error visible.
    pub fn on_blur(&mut self, key: &str) {
        self.touched.insert(key.to_string());
        self.errors = validate::validate(self.schema, &self.values);
    }

    /// Timer callback: fires the pending draft save once its quiet period
    /// has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.fire_if_due(now) {
            self.store.save(&self.values);
        }
    }

    /// Cancels any pending save; call on unmount/navigation so nothing
    /// writes after the page is gone.
    pub fn teardown(&mut self) {
        self.debounce.cancel();
    }

    /// Full-form validation followed by the submission pipeline.
    ///
    /// The draft is cleared only after the primary submission succeeds, so a
    /// failure (and a reload during the error state) keeps the persisted
    /// snapshot as well as the in-memory values.
    pub fn on_submit(
        &mut self,
        submitter: &mut dyn Submitter,
        navigator: &mut dyn Navigator,
        viewport: &mut dyn Viewport,
    ) -> SubmitOutcome {
        self.submit_attempted = true;
        self.errors = validate::validate(self.schema, &self.values);
        if !self.errors.is_empty() {
            for field in self.schema.fields() {
                self.touched.insert(field.key.to_string());
            }
            if let Some(key) = validate::first_error_key(self.schema, &self.errors) {
                viewport.scroll_to_field(key);
            }
            return SubmitOutcome::Invalid;
        }

        self.status = SubmissionStatus::Submitting;
        self.debounce.cancel();
        match submitter.submit(&self.values) {
            Ok(()) => {
                self.store.clear();
                self.status = SubmissionStatus::Idle;
                navigator.navigate(&self.config.calendly_url);
                SubmitOutcome::Redirecting
            }
            Err(err) => {
                tracing::warn!(error = %err, "submission failed, keeping entered values");
                self.status = SubmissionStatus::Error(SUBMIT_ERROR_MESSAGE.to_string());
                viewport.scroll_to_top();
                SubmitOutcome::Failed
            }
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Errors gated by visibility: untouched fields stay silent until a
    /// submit has been attempted.
    pub fn visible_errors(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().filter_map(move |(key, message)| {
            if self.submit_attempted || self.touched.contains(*key) {
                Some((*key, message.as_str()))
            } else {
                None
            }
        })
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.schema.visible_fields(&self.values)
    }

    pub fn progress(&self) -> u8 {
        progress::progress(self.schema, &self.values)
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn restored_from_draft(&self) -> bool {
        self.restored
    }

    pub fn save_pending(&self) -> bool {
        self.debounce.is_pending()
    }
}
