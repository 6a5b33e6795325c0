//! Renderer double that records every drawing call.

use std::cell::RefCell;
use todo_client_core::task::{Task, TaskId};
use todo_client_view::renderer::Renderer;

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderCall {
    /// `enter_display` for this task.
    Display(TaskId),
    /// `enter_edit` for this task with this draft.
    Edit(TaskId, String),
    /// `edit_rejected` for this task with this message.
    EditRejected(TaskId, String),
    /// `destroy` for this task.
    Destroyed(TaskId),
}

/// Records drawing calls in order for later assertion.
#[derive(Default)]
pub struct RecordingRenderer {
    calls: RefCell<Vec<RenderCall>>,
}

impl RecordingRenderer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything drawn so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.borrow().clone()
    }

    /// The most recent drawing call, if any.
    #[must_use]
    pub fn last(&self) -> Option<RenderCall> {
        self.calls.borrow().last().cloned()
    }

    /// How many slots have been destroyed.
    #[must_use]
    pub fn destroyed_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, RenderCall::Destroyed(_)))
            .count()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Renderer for RecordingRenderer {
    fn enter_display(&self, task: &Task) {
        self.calls
            .borrow_mut()
            .push(RenderCall::Display(task.id.clone()));
    }

    fn enter_edit(&self, task: &Task, draft: &str) {
        self.calls
            .borrow_mut()
            .push(RenderCall::Edit(task.id.clone(), draft.to_string()));
    }

    fn edit_rejected(&self, task: &Task, message: &str) {
        self.calls
            .borrow_mut()
            .push(RenderCall::EditRejected(task.id.clone(), message.to_string()));
    }

    fn destroy(&self, id: &TaskId) {
        self.calls.borrow_mut().push(RenderCall::Destroyed(id.clone()));
    }
}
