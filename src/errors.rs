use thiserror::Error;

/// Failures raised by the draft persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Draft schema version {found} does not match {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

/// Failures of the primary submission step. These surface to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Submission failed: {0}")]
    Failed(String),
    #[error("Submission timed out")]
    TimedOut,
}

/// Failures of a notification dispatch. Best-effort; never shown to the user.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Email transport error: {0}")]
    Transport(String),
    #[error("Email service configuration missing: {0}")]
    MissingConfig(&'static str),
}
