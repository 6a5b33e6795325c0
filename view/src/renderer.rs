//! Rendering capability.
//!
//! The state machine knows nothing about markup. At each externally visible
//! transition it calls one of the points below; what a "slot" looks like on
//! screen is entirely the implementation's business. Production code binds
//! this to the real widget layer, tests use a recording double.

use todo_client_core::task::{Task, TaskId};

/// Drawing capability the per-task state machine calls at defined points.
///
/// Implementations may post events from these callbacks (a click handler
/// wired during `enter_edit` posting `TaskUpdateRequested`, for example);
/// the state machine releases its own borrows before calling in here.
pub trait Renderer {
    /// Draw the task in its read-only display form.
    fn enter_display(&self, task: &Task);

    /// Draw the task's edit form with the current uncommitted draft.
    fn enter_edit(&self, task: &Task, draft: &str);

    /// Show a failure message on the edit form without leaving it.
    fn edit_rejected(&self, task: &Task, message: &str);

    /// Tear down whatever was drawn for this task.
    fn destroy(&self, id: &TaskId);
}
