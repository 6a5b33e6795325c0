//! Backend collaborator contract.
//!
//! The client core never talks HTTP directly. Everything it needs from the
//! server is behind [`TodoBackend`], a dyn-compatible async trait: the HTTP
//! implementation lives in its own crate and tests substitute a scripted
//! stub.
//!
//! The server contract is deliberately coarse: HTTP 200 is success, any
//! other status is failure. The client does not distinguish failure
//! sub-kinds beyond what [`BackendError`] carries.
//!
//! # Dyn Compatibility
//!
//! Methods return explicit `Pin<Box<dyn Future>>` instead of `async fn` so
//! the trait can be used as `Arc<dyn TodoBackend>` by the service facades.

use crate::session::AuthToken;
use crate::task::{Task, TaskId, TodoListId};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors surfaced by a backend implementation.
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    /// The server answered with a non-200 status.
    #[error("request failed with status {0}")]
    Status(u16),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response arrived but could not be decoded.
    #[error("response decoding failed: {0}")]
    Decode(String),
}

/// Future returned by [`TodoBackend`] operations.
pub type BackendFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send + 'a>>;

/// The consumed server surface.
///
/// Implementations must be `Send + Sync`; the futures they return resolve
/// on the client's single thread, but the backend itself is shared across
/// service facades.
///
/// No operation is retried and none can be cancelled once issued: a
/// superseding user action only changes local UI state, never an in-flight
/// request.
pub trait TodoBackend: Send + Sync {
    /// Fetches every task of `list`, in server delivery order.
    fn all_tasks<'a>(&'a self, list: &'a TodoListId) -> BackendFuture<'a, Vec<Task>>;

    /// Adds a task with a client-chosen id and description.
    fn add_task<'a>(
        &'a self,
        list: &'a TodoListId,
        task: &'a TaskId,
        description: &'a str,
    ) -> BackendFuture<'a, ()>;

    /// Replaces a task's description and completion status.
    fn update_task<'a>(
        &'a self,
        list: &'a TodoListId,
        task: &'a TaskId,
        description: &'a str,
        completed: bool,
    ) -> BackendFuture<'a, ()>;

    /// Removes a task.
    fn remove_task<'a>(&'a self, list: &'a TodoListId, task: &'a TaskId)
    -> BackendFuture<'a, ()>;

    /// Fetches the ids of every list owned by the session.
    fn all_lists(&self) -> BackendFuture<'_, Vec<TodoListId>>;

    /// Creates an empty list with a client-chosen id.
    fn create_list<'a>(&'a self, list: &'a TodoListId) -> BackendFuture<'a, ()>;

    /// Exchanges credentials for a session token.
    fn sign_in<'a>(&'a self, username: &'a str, password: &'a str)
    -> BackendFuture<'a, AuthToken>;

    /// Checks that the current session token is still accepted.
    fn check_session(&self) -> BackendFuture<'_, ()>;

    /// Ends the current session on the server.
    fn sign_out(&self) -> BackendFuture<'_, ()>;
}
