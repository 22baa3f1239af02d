//! Caller-facing clients in front of the collection actors.

#[macro_use]
mod macros;

pub mod user_client;
pub mod user_filters;

pub use user_client::UserClient;

use tracing::{error, warn};

use crate::error::FrameworkError;
use crate::user_actor::UserError;

/// Record a store failure for operators and hand back what callers may see.
///
/// A unique index violation is the one store error callers can act on, so it
/// keeps the offending field name. Everything else becomes
/// [`UserError::StoreFailure`].
pub(crate) fn sanitize_store_error(operation: &'static str, err: FrameworkError) -> UserError {
    match err {
        FrameworkError::DuplicateKey { field } => {
            warn!(operation, %field, "Rejected duplicate value");
            UserError::AlreadyExists(field)
        }
        other => {
            error!(operation, error = %other, "Store operation failed");
            UserError::StoreFailure
        }
    }
}
