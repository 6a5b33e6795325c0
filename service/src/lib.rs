//! # Todo Client Service
//!
//! Validating facades between the UI and the backend collaborator.
//!
//! Each facade follows the same pattern: validate input locally (raising a
//! validation failure before any network call), delegate to the
//! [`TodoBackend`](todo_client_core::backend::TodoBackend) trait, and post
//! the outcome on the event bus. Request failures are never retried and
//! never swallowed; every recognized failure degrades to a user-visible
//! event, never a crash.
//!
//! ## Components
//!
//! - **[`todo_list::TodoListService`]**: add/update/remove/all for one
//!   list's tasks
//! - **[`auth::AuthService`]**: sign-in/sign-out and the session token
//!   lifecycle
//! - **[`lists::TodoListsService`]**: list-of-lists management

/// Session token lifecycle.
pub mod auth;
/// Service-level error type.
pub mod error;
/// List-of-lists operations.
pub mod lists;
/// Task operations for one to-do list.
pub mod todo_list;

pub use auth::AuthService;
pub use error::ServiceError;
pub use lists::TodoListsService;
pub use todo_list::TodoListService;
