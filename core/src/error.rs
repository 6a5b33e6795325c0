//! Local validation failures.
//!
//! Validation happens before any network call and is always recovered
//! locally: the facade converts a [`ValidationError`] into a user-visible
//! failure event and never lets it reach the transport layer.

use thiserror::Error;

/// Input rejected before it reaches the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A task description was empty or whitespace-only.
    #[error("Task description cannot be empty")]
    EmptyDescription,

    /// An identifier was empty or whitespace-only.
    #[error("Identifier cannot be blank")]
    BlankId,
}
