//! # Todo Client View
//!
//! View-model layer for the to-do client: per-task state machines and the
//! reconciliation that keeps them synchronized with the server-confirmed
//! task list.
//!
//! ## Core Components
//!
//! - **[`renderer::Renderer`]**: the drawing capability, called at defined
//!   transition points; no markup lives in this crate
//! - **[`entry::TaskEntry`]**: a task bound to its Display/Edit state
//!   machine and subscription arena
//! - **[`reconcile::Reconciler`]**: merges previous entries with a fresh
//!   task array, preserving per-entry transient state
//! - **[`list::TaskListView`]**: owns the ordered entry table and reacts to
//!   `TaskListUpdated`
//!
//! ## Ownership
//!
//! The entry table is owned exclusively by the list view and the merge that
//! rebuilds it; entries own their bus subscriptions and release them
//! together on teardown. There is no locking anywhere in this crate: the
//! whole layer runs on the single UI thread.

/// Per-task display/edit state machine.
pub mod entry;
/// The on-screen task list.
pub mod list;
/// Reconciliation of stateful entries with a fresh task list.
pub mod reconcile;
/// Rendering capability.
pub mod renderer;

pub use entry::{Phase, TaskEntry};
pub use list::TaskListView;
pub use reconcile::Reconciler;
pub use renderer::Renderer;
