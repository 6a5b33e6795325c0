//! # Todo Client Core
//!
//! Domain types and leaf components for the browser-style to-do client.
//!
//! This crate provides the pieces with no dependencies on the rest of the
//! workspace:
//!
//! - **Task model**: [`task::TaskId`], [`task::TodoListId`], [`task::Task`]
//! - **Events**: the closed [`event::Event`] variant set and its
//!   [`event::EventType`] tags
//! - **Event bus**: the synchronous, same-thread dispatcher
//!   [`event_bus::EventBus`]
//! - **Ordering**: the total display order over tasks in [`order`]
//! - **Backend seam**: the [`backend::TodoBackend`] trait the HTTP crate
//!   implements and tests stub out
//! - **Session**: the explicit [`session::Session`] token context
//!
//! ## Concurrency Model
//!
//! Everything here except the backend seam is single-threaded and
//! synchronous, mirroring a cooperative browser event loop: `post` runs
//! subscribers to completion before returning, and network responses are
//! futures that resolve on the same thread. Correctness of the UI state
//! therefore rests on disciplined subscribe/unsubscribe pairing, not on
//! locks.

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

/// Backend collaborator trait and error taxonomy.
pub mod backend;
/// Local validation failures.
pub mod error;
/// Domain events and their type tags.
pub mod event;
/// Synchronous typed publish/subscribe dispatcher.
pub mod event_bus;
/// Display ordering for tasks.
pub mod order;
/// Session token context.
pub mod session;
/// Task and identifier value types.
pub mod task;

pub use backend::{BackendError, BackendFuture, TodoBackend};
pub use error::ValidationError;
pub use event::{Event, EventType};
pub use event_bus::{EventBus, Subscription};
pub use session::{AuthToken, Session};
pub use task::{Task, TaskId, TodoListId};
