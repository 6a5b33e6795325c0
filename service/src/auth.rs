//! Session token lifecycle.
//!
//! Sign-in exchanges credentials for a token and stores it in the shared
//! [`Session`]; sign-out clears it. The token context is explicit: nothing
//! in the client reads a global.

use crate::error::ServiceError;
use std::sync::Arc;
use todo_client_core::backend::TodoBackend;
use todo_client_core::event::Event;
use todo_client_core::event_bus::EventBus;
use todo_client_core::session::Session;

/// Facade over the `/auth` surface.
pub struct AuthService {
    backend: Arc<dyn TodoBackend>,
    session: Arc<Session>,
    bus: EventBus,
}

impl AuthService {
    /// Creates a facade storing tokens in `session` and posting outcomes
    /// on `bus`.
    #[must_use]
    pub fn new(backend: Arc<dyn TodoBackend>, session: Arc<Session>, bus: EventBus) -> Self {
        Self {
            backend,
            session,
            bus,
        }
    }

    /// Exchanges credentials for a session token.
    ///
    /// On success the token is stored and `SignedIn` is posted; on failure
    /// any stale token is cleared and `SignInFailed` is posted.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Backend`] if the server rejects the
    /// credentials or the request fails.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<(), ServiceError> {
        match self.backend.sign_in(username, password).await {
            Ok(token) => {
                self.session.init(token);
                tracing::info!(username, "signed in");
                self.bus.post(&Event::SignedIn);
                Ok(())
            }
            Err(err) => {
                self.session.clear();
                tracing::warn!(username, error = %err, "sign-in failed");
                self.bus.post(&Event::SignInFailed {
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Ends the session.
    ///
    /// The local token is cleared and `SignedOut` is posted whether or not
    /// the server acknowledged: a failed sign-out must never leave the UI
    /// signed in.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Backend`] if the server call failed; the
    /// local session is cleared regardless.
    pub async fn sign_out(&self) -> Result<(), ServiceError> {
        let result = self.backend.sign_out().await;
        self.session.clear();
        self.bus.post(&Event::SignedOut);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "server sign-out failed, session cleared locally");
        }
        Ok(result?)
    }

    /// Whether the stored token is still accepted by the server.
    pub async fn has_valid_session(&self) -> bool {
        self.session.is_active() && self.backend.check_session().await.is_ok()
    }
}
