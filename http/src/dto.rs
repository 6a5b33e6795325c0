//! Wire representations of the backend's JSON bodies.
//!
//! The server wraps task ids in an object (`{"id": {"value": "..."}}`) and
//! uses camelCase field names throughout; these types absorb both quirks so
//! the domain model stays clean.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_client_core::backend::BackendError;
use todo_client_core::task::{Task, TaskId};

/// `{"value": "..."}` wrapper around a task id.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TaskIdDto {
    pub value: String,
}

/// A task as delivered by `GET /lists/{listId}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskDto {
    pub id: TaskIdDto,
    pub description: String,
    pub completed: bool,
    pub creation_date: DateTime<Utc>,
    pub last_update_date: DateTime<Utc>,
}

impl TryFrom<TaskDto> for Task {
    type Error = BackendError;

    fn try_from(dto: TaskDto) -> Result<Self, Self::Error> {
        let id = TaskId::new(dto.id.value)
            .map_err(|err| BackendError::Decode(err.to_string()))?;
        Self::from_parts(
            id,
            dto.description,
            dto.completed,
            dto.creation_date,
            dto.last_update_date,
        )
        .map_err(|err| BackendError::Decode(err.to_string()))
    }
}

/// Body of `POST /lists/{listId}/{taskId}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddTaskBody<'a> {
    pub task_description: &'a str,
}

/// Body of `PUT /lists/{listId}/{taskId}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTaskBody<'a> {
    pub task_status: bool,
    pub task_description: &'a str,
}
