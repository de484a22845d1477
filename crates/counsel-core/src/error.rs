use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every failure the service reports. Handlers convert these into a
/// structured `{success: false, message}` outcome; nothing is retried and
/// nothing crashes the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed shape validation. No model call was attempted.
    #[error("Validation failed.")]
    Validation(Vec<FieldError>),

    /// OCR produced no usable text; the analysis fan-out never started.
    #[error("{0}")]
    Extraction(String),

    /// One of the four analysis calls failed or returned schema-invalid
    /// output. The whole upload is aborted, nothing is persisted.
    #[error("{0}")]
    Analysis(String),

    /// A model call outside the analysis fan-out failed (transport, bad
    /// status, or schema-invalid output).
    #[error("{0}")]
    Model(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("Document not found.")]
    NotFound(String),

    /// Deletion was attempted on a built-in example document.
    #[error("Example documents cannot be deleted.")]
    ProtectedRecord(String),

    /// The collection was modified between read and write (stale revision).
    #[error("the store was modified concurrently; retry the operation")]
    Conflict,
}

impl Error {
    pub fn store(cause: impl std::fmt::Display) -> Self {
        Self::Store(cause.to_string())
    }
}
