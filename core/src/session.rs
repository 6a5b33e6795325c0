//! Session token context.
//!
//! The session token is not global state: it lives in an explicit
//! [`Session`] object handed to whoever needs it, with `init` on sign-in
//! and `clear` on sign-out. The HTTP backend reads the token on every
//! request to fill the `X-Todo-Token` header.

use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};

/// An opaque session token issued by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw token for the `X-Todo-Token` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Holder for the current session token.
///
/// The lock exists only because backend futures must be `Send`; there is no
/// concurrent mutation in the single-threaded client, so contention never
/// happens in practice.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<AuthToken>>,
}

impl Session {
    /// Creates a session with no token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the token issued at sign-in.
    pub fn init(&self, token: AuthToken) {
        *self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Forgets the token at sign-out.
    pub fn clear(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The current token, if a session is active.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a token is currently stored.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.token().is_some()
    }
}
