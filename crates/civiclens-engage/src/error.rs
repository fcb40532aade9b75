//! The rejection taxonomy shared by every engagement operation.

use civiclens_store::AtomicStateMutationError;

/// Why an engagement operation refused to run.
///
/// Operations reject before persisting anything, so an error always
/// means the state is exactly what it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum EngageError {
    /// Input failed a shape or bounds check.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No issue with this id.
    #[error("issue not found: {0}")]
    IssueNotFound(String),

    /// No user with this id.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// No notification with this id.
    #[error("notification not found: {0}")]
    NotificationNotFound(String),

    /// A same-titled report already exists within the duplicate radius.
    #[error("a similar issue already exists nearby: {conflict_id}")]
    DuplicateIssue { conflict_id: String },

    /// The proximity backend could not answer, so creation fails closed.
    #[error("geospatial lookup unavailable: {0}")]
    GeoUnavailable(String),

    /// The actor may not touch this row.
    #[error("forbidden: {0}")]
    Forbidden(String),
}

/// Error shape of the lock-scoped `*_jsonl` operation forms.
pub type EngageJsonlError = AtomicStateMutationError<EngageError>;
