//! Service-level error type.

use thiserror::Error;
use todo_client_core::backend::BackendError;
use todo_client_core::error::ValidationError;

/// Why a service operation did not complete.
///
/// Every variant has already been surfaced on the event bus by the time the
/// caller sees it; the `Result` exists for programmatic callers and tests,
/// not as the primary reporting channel.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Input was rejected locally, before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend rejected or never received the request.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
