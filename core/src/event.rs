//! Domain events and their type tags.
//!
//! Events form a closed set of variants: every occurrence the client reacts
//! to is one arm of [`Event`], tagged by the matching [`EventType`]. Dispatch
//! is by tag, so a subscriber registers for one `EventType` and receives only
//! events carrying that tag.
//!
//! The closed enum replaces the per-event class hierarchy of a dynamically
//! typed bus: posting an unknown event or subscribing to an unknown type is
//! unrepresentable here, so neither operation has a failure mode.

use crate::task::{Task, TaskId};
use serde::{Deserialize, Serialize};

/// Tag identifying a category of domain occurrence.
///
/// `Display` yields the conventional wire-style name (`"TaskListUpdated"`,
/// `"TaskRemoved"`, ...), used for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A user asked for a new task to be added.
    TaskAddRequested,
    /// Adding a task was rejected by the backend.
    TaskAddFailed,
    /// A fresh server-confirmed task list is available.
    TaskListUpdated,
    /// Fetching the task list failed.
    TaskListRefreshFailed,
    /// A user began editing a task.
    TaskEditingStarted,
    /// A user abandoned an in-progress edit.
    TaskEditingCanceled,
    /// A user asked for a task to be updated or completed.
    TaskUpdateRequested,
    /// The backend confirmed a task update.
    TaskUpdated,
    /// Updating a task was rejected by the backend.
    TaskUpdateFailed,
    /// A user asked for a task to be removed.
    TaskRemovalRequested,
    /// The backend confirmed a task removal.
    TaskRemoved,
    /// Removing a task was rejected by the backend.
    TaskRemovalFailed,
    /// Input was rejected before any network call.
    ValidationFailed,
    /// A session was established.
    SignedIn,
    /// Establishing a session failed.
    SignInFailed,
    /// The session was ended.
    SignedOut,
}

impl EventType {
    /// Returns the conventional name of this tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAddRequested => "TaskAddRequested",
            Self::TaskAddFailed => "TaskAddFailed",
            Self::TaskListUpdated => "TaskListUpdated",
            Self::TaskListRefreshFailed => "TaskListRefreshFailed",
            Self::TaskEditingStarted => "TaskEditingStarted",
            Self::TaskEditingCanceled => "TaskEditingCanceled",
            Self::TaskUpdateRequested => "TaskUpdateRequested",
            Self::TaskUpdated => "TaskUpdated",
            Self::TaskUpdateFailed => "TaskUpdateFailed",
            Self::TaskRemovalRequested => "TaskRemovalRequested",
            Self::TaskRemoved => "TaskRemoved",
            Self::TaskRemovalFailed => "TaskRemovalFailed",
            Self::ValidationFailed => "ValidationFailed",
            Self::SignedIn => "SignedIn",
            Self::SignInFailed => "SignInFailed",
            Self::SignedOut => "SignedOut",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged, immutable payload posted on the event bus.
///
/// Each variant carries only its own fields. Request variants are posted by
/// the UI layer on user interaction; confirmed/failed variants are posted by
/// the services after the backend answers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A user asked for a new task with this description.
    TaskAddRequested {
        /// Raw description as typed, not yet validated.
        description: String,
    },
    /// Adding a task failed.
    TaskAddFailed {
        /// Human-readable failure message.
        message: String,
    },
    /// A fresh server-confirmed task list, in backend delivery order.
    TaskListUpdated {
        /// The canonical tasks; ordering for display is the reconciler's job.
        tasks: Vec<Task>,
    },
    /// Fetching the task list failed.
    TaskListRefreshFailed {
        /// Human-readable failure message.
        message: String,
    },
    /// A user began editing this task.
    TaskEditingStarted {
        /// The task being edited.
        id: TaskId,
    },
    /// A user abandoned the in-progress edit of this task.
    TaskEditingCanceled {
        /// The task whose edit was abandoned.
        id: TaskId,
    },
    /// A user asked for this task to be updated.
    TaskUpdateRequested {
        /// The task to update.
        id: TaskId,
        /// New description, not yet validated.
        description: String,
        /// New completion status.
        completed: bool,
    },
    /// The backend confirmed an update; carries the fresh task value.
    TaskUpdated {
        /// The task as confirmed by the server.
        task: Task,
    },
    /// Updating this task failed.
    TaskUpdateFailed {
        /// The task whose update failed.
        id: TaskId,
        /// Human-readable failure message.
        message: String,
    },
    /// A user asked for this task to be removed.
    TaskRemovalRequested {
        /// The task to remove.
        id: TaskId,
    },
    /// The backend confirmed this task is gone.
    TaskRemoved {
        /// The removed task.
        id: TaskId,
    },
    /// Removing this task failed.
    TaskRemovalFailed {
        /// The task whose removal failed.
        id: TaskId,
        /// Human-readable failure message.
        message: String,
    },
    /// Input was rejected locally, before any network call.
    ValidationFailed {
        /// Human-readable failure message.
        message: String,
    },
    /// A session was established.
    SignedIn,
    /// Establishing a session failed.
    SignInFailed {
        /// Human-readable failure message.
        message: String,
    },
    /// The session was ended.
    SignedOut,
}

impl Event {
    /// Returns the tag of this event.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::TaskAddRequested { .. } => EventType::TaskAddRequested,
            Self::TaskAddFailed { .. } => EventType::TaskAddFailed,
            Self::TaskListUpdated { .. } => EventType::TaskListUpdated,
            Self::TaskListRefreshFailed { .. } => EventType::TaskListRefreshFailed,
            Self::TaskEditingStarted { .. } => EventType::TaskEditingStarted,
            Self::TaskEditingCanceled { .. } => EventType::TaskEditingCanceled,
            Self::TaskUpdateRequested { .. } => EventType::TaskUpdateRequested,
            Self::TaskUpdated { .. } => EventType::TaskUpdated,
            Self::TaskUpdateFailed { .. } => EventType::TaskUpdateFailed,
            Self::TaskRemovalRequested { .. } => EventType::TaskRemovalRequested,
            Self::TaskRemoved { .. } => EventType::TaskRemoved,
            Self::TaskRemovalFailed { .. } => EventType::TaskRemovalFailed,
            Self::ValidationFailed { .. } => EventType::ValidationFailed,
            Self::SignedIn => EventType::SignedIn,
            Self::SignInFailed { .. } => EventType::SignInFailed,
            Self::SignedOut => EventType::SignedOut,
        }
    }

    /// Returns the task id this event is about, if it concerns a single task.
    #[must_use]
    pub const fn task_id(&self) -> Option<&TaskId> {
        match self {
            Self::TaskEditingStarted { id }
            | Self::TaskEditingCanceled { id }
            | Self::TaskUpdateRequested { id, .. }
            | Self::TaskUpdateFailed { id, .. }
            | Self::TaskRemovalRequested { id }
            | Self::TaskRemoved { id }
            | Self::TaskRemovalFailed { id, .. } => Some(id),
            Self::TaskUpdated { task } => Some(&task.id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use chrono::Utc;

    fn sample_task() -> Task {
        Task::new(TaskId::new("t-1").unwrap(), "Buy milk", Utc::now()).unwrap()
    }

    #[test]
    fn event_type_matches_variant() {
        let event = Event::TaskRemoved {
            id: TaskId::new("t-1").unwrap(),
        };
        assert_eq!(event.event_type(), EventType::TaskRemoved);
    }

    #[test]
    fn event_type_display_uses_conventional_name() {
        assert_eq!(EventType::TaskListUpdated.to_string(), "TaskListUpdated");
        assert_eq!(EventType::SignInFailed.to_string(), "SignInFailed");
    }

    #[test]
    fn task_id_extracted_from_task_scoped_events() {
        let id = TaskId::new("t-9").unwrap();
        let event = Event::TaskUpdateFailed {
            id: id.clone(),
            message: "boom".to_string(),
        };
        assert_eq!(event.task_id(), Some(&id));

        let event = Event::TaskUpdated {
            task: sample_task(),
        };
        assert_eq!(event.task_id().map(TaskId::as_str), Some("t-1"));
    }

    #[test]
    fn list_scoped_events_have_no_task_id() {
        let event = Event::TaskListUpdated {
            tasks: vec![sample_task()],
        };
        assert_eq!(event.task_id(), None);
        assert_eq!(Event::SignedOut.task_id(), None);
    }
}
