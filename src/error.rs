use thiserror::Error;

/// Failures raised by the collection actor or the channel in front of it.
///
/// These never reach API callers directly; the client layer logs them and
/// converts them into a sanitized [`crate::user_actor::UserError`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("Duplicate key on field {field}")]
    DuplicateKey { field: String },
    #[error("Document rejected: {0}")]
    Rejected(String),
}
