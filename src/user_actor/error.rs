use thiserror::Error;

/// Errors that can occur during user operations.
///
/// `StoreFailure` carries no detail. The underlying cause is logged where it
/// happens and only the generic message crosses the API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Server Error")]
    StoreFailure,
}
