//! Task and identifier value types.
//!
//! Identifiers wrap non-empty strings and order lexicographically, so two
//! identifiers built from the same string are equal regardless of where they
//! were constructed. [`Task`] is immutable by convention: update and
//! completion produce new values, nothing mutates a task in place once it is
//! bound to the UI.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task within a list.
///
/// Equality and ordering are by the underlying string value, never by
/// object identity. The wrapped string is guaranteed non-empty after
/// trimming.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a `TaskId` from a raw string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankId`] if the string is empty or
    /// whitespace-only.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::BlankId);
        }
        Ok(Self(raw))
    }

    /// Generates a fresh random `TaskId`.
    ///
    /// The backend expects the client to choose the identifier when adding
    /// a task, so new tasks are keyed by a freshly generated UUID.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a to-do list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TodoListId(String);

impl TodoListId {
    /// Creates a `TodoListId` from a raw string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankId`] if the string is empty or
    /// whitespace-only.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::BlankId);
        }
        Ok(Self(raw))
    }

    /// Returns the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single server-confirmed task.
///
/// The description is non-empty and trimmed. `last_update_date` defaults to
/// `creation_date` and moves forward whenever the server confirms an update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the owning list.
    pub id: TaskId,
    /// What needs doing.
    pub description: String,
    /// Whether the task has been completed.
    pub completed: bool,
    /// When the task was created.
    pub creation_date: DateTime<Utc>,
    /// When the task was last changed. Equals `creation_date` for a task
    /// that has never been updated.
    pub last_update_date: DateTime<Utc>,
}

impl Task {
    /// Creates a new incomplete task. The last-update date starts out equal
    /// to the creation date.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDescription`] if the description is
    /// empty after trimming.
    pub fn new(
        id: TaskId,
        description: impl Into<String>,
        creation_date: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let description = trimmed(description.into())?;
        Ok(Self {
            id,
            description,
            completed: false,
            creation_date,
            last_update_date: creation_date,
        })
    }

    /// Reconstructs a task from all of its fields, as delivered by the
    /// backend.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDescription`] if the description is
    /// empty after trimming.
    pub fn from_parts(
        id: TaskId,
        description: impl Into<String>,
        completed: bool,
        creation_date: DateTime<Utc>,
        last_update_date: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let description = trimmed(description.into())?;
        Ok(Self {
            id,
            description,
            completed,
            creation_date,
            last_update_date,
        })
    }

    /// Returns a copy with a new description and update timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDescription`] if the description is
    /// empty after trimming.
    pub fn with_description(
        &self,
        description: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let description = trimmed(description.into())?;
        Ok(Self {
            description,
            last_update_date: updated_at,
            ..self.clone()
        })
    }

    /// Returns a completed copy with a new update timestamp.
    #[must_use]
    pub fn completed_at(&self, updated_at: DateTime<Utc>) -> Self {
        Self {
            completed: true,
            last_update_date: updated_at,
            ..self.clone()
        }
    }
}

fn trimmed(raw: String) -> Result<String, ValidationError> {
    let description = raw.trim().to_string();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(description)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    #[test]
    fn task_id_rejects_blank_input() {
        assert!(TaskId::new("").is_err());
        assert!(TaskId::new("   ").is_err());
        assert!(TaskId::new("task-1").is_ok());
    }

    #[test]
    fn task_id_equality_is_by_value() {
        let a = TaskId::new("same").unwrap();
        let b = TaskId::new("same").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn task_id_orders_lexicographically() {
        let a = TaskId::new("a").unwrap();
        let b = TaskId::new("b").unwrap();
        assert!(a < b);
    }

    #[test]
    fn random_task_ids_are_distinct() {
        assert_ne!(TaskId::random(), TaskId::random());
    }

    #[test]
    fn new_task_defaults_last_update_to_creation() {
        let now = Utc::now();
        let task = Task::new(TaskId::random(), "Buy milk", now).unwrap();
        assert_eq!(task.creation_date, now);
        assert_eq!(task.last_update_date, now);
        assert!(!task.completed);
    }

    #[test]
    fn new_task_trims_description() {
        let task = Task::new(TaskId::random(), "  Buy milk  ", Utc::now()).unwrap();
        assert_eq!(task.description, "Buy milk");
    }

    #[test]
    fn new_task_rejects_blank_description() {
        assert!(matches!(
            Task::new(TaskId::random(), "   ", Utc::now()),
            Err(ValidationError::EmptyDescription)
        ));
    }

    #[test]
    fn with_description_produces_new_value() {
        let created = Utc::now();
        let task = Task::new(TaskId::random(), "Old", created).unwrap();
        let updated_at = created + chrono::Duration::seconds(5);

        let updated = task.with_description("New", updated_at).unwrap();

        assert_eq!(task.description, "Old");
        assert_eq!(updated.description, "New");
        assert_eq!(updated.creation_date, created);
        assert_eq!(updated.last_update_date, updated_at);
    }

    #[test]
    fn completed_at_flips_status_and_timestamp() {
        let created = Utc::now();
        let task = Task::new(TaskId::random(), "Buy milk", created).unwrap();
        let done_at = created + chrono::Duration::seconds(30);

        let done = task.completed_at(done_at);

        assert!(done.completed);
        assert_eq!(done.last_update_date, done_at);
        assert!(!task.completed);
    }
}
