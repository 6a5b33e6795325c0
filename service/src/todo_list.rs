//! Task operations for one to-do list.
//!
//! [`TodoListService`] validates input locally, delegates to the backend
//! collaborator, and reports every outcome as a domain event. Validation
//! failures never reach the network: the facade posts the failure event and
//! returns before any call is issued.
//!
//! A note on races: two updates to the same task may be in flight at once;
//! whichever response resolves later wins, regardless of issue order. There
//! is no sequencing token and no cancellation path, so a slow earlier
//! update can silently overwrite a faster later one. This mirrors the
//! backend contract and is accepted, not solved, here.

use crate::error::ServiceError;
use std::rc::Rc;
use std::sync::Arc;
use tokio::task;
use todo_client_core::backend::TodoBackend;
use todo_client_core::error::ValidationError;
use todo_client_core::event::{Event, EventType};
use todo_client_core::event_bus::{EventBus, Subscription};
use todo_client_core::task::{Task, TaskId, TodoListId};

/// Validating facade over the backend for a single list's tasks.
pub struct TodoListService {
    backend: Arc<dyn TodoBackend>,
    bus: EventBus,
    list: TodoListId,
}

impl TodoListService {
    /// Creates a facade for `list`, posting outcomes on `bus`.
    #[must_use]
    pub fn new(backend: Arc<dyn TodoBackend>, bus: EventBus, list: TodoListId) -> Self {
        Self { backend, bus, list }
    }

    /// The list this facade operates on.
    #[must_use]
    pub const fn list(&self) -> &TodoListId {
        &self.list
    }

    /// Fetches all tasks in the order the backend delivered them.
    ///
    /// Ordering for display is the reconciler's job, not this facade's.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Backend`] if the fetch fails.
    pub async fn all(&self) -> Result<Vec<Task>, ServiceError> {
        Ok(self.backend.all_tasks(&self.list).await?)
    }

    /// Fetches all tasks and posts `TaskListUpdated` with the result, or
    /// `TaskListRefreshFailed` if the fetch fails.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Backend`] if the fetch fails; the failure
    /// event has been posted by then.
    pub async fn refresh(&self) -> Result<Vec<Task>, ServiceError> {
        match self.backend.all_tasks(&self.list).await {
            Ok(tasks) => {
                tracing::debug!(list = %self.list, count = tasks.len(), "task list refreshed");
                self.bus.post(&Event::TaskListUpdated {
                    tasks: tasks.clone(),
                });
                Ok(tasks)
            }
            Err(err) => {
                tracing::warn!(list = %self.list, error = %err, "task list refresh failed");
                self.bus.post(&Event::TaskListRefreshFailed {
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Adds a task with a freshly generated id and returns that id.
    ///
    /// On success the list is refreshed so the new server-confirmed task
    /// reaches the reconciler. A refresh failure after a successful add is
    /// reported through `TaskListRefreshFailed` but does not fail the add.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for a blank description
    /// (posted as `ValidationFailed`, no network call issued) or
    /// [`ServiceError::Backend`] if the backend rejects the add (posted as
    /// `TaskAddFailed`).
    pub async fn add(&self, description: &str) -> Result<TaskId, ServiceError> {
        let description = match validate_description(description) {
            Ok(description) => description,
            Err(err) => {
                self.bus.post(&Event::ValidationFailed {
                    message: err.to_string(),
                });
                return Err(err.into());
            }
        };

        let id = TaskId::random();
        match self.backend.add_task(&self.list, &id, &description).await {
            Ok(()) => {
                tracing::info!(list = %self.list, id = %id, "task added");
                self.refresh().await.ok();
                Ok(id)
            }
            Err(err) => {
                self.bus.post(&Event::TaskAddFailed {
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Replaces a task's description and completion status.
    ///
    /// On success posts `TaskUpdated` with the server-confirmed task value
    /// followed by `TaskListUpdated` with the refreshed list.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] for a blank description
    /// (posted as `TaskUpdateFailed` so an open edit form can show it, no
    /// network call issued) or [`ServiceError::Backend`] if the update or
    /// the confirming refresh fails.
    pub async fn update(
        &self,
        id: &TaskId,
        description: &str,
        completed: bool,
    ) -> Result<(), ServiceError> {
        let description = match validate_description(description) {
            Ok(description) => description,
            Err(err) => {
                self.bus.post(&Event::TaskUpdateFailed {
                    id: id.clone(),
                    message: err.to_string(),
                });
                return Err(err.into());
            }
        };

        if let Err(err) = self
            .backend
            .update_task(&self.list, id, &description, completed)
            .await
        {
            self.bus.post(&Event::TaskUpdateFailed {
                id: id.clone(),
                message: err.to_string(),
            });
            return Err(err.into());
        }

        tracing::info!(list = %self.list, id = %id, completed, "task updated");

        // The server owns the update timestamp, so refetch for the
        // confirmed value before announcing it.
        let tasks = match self.backend.all_tasks(&self.list).await {
            Ok(tasks) => tasks,
            Err(err) => {
                self.bus.post(&Event::TaskListRefreshFailed {
                    message: err.to_string(),
                });
                return Err(err.into());
            }
        };
        if let Some(task) = tasks.iter().find(|task| task.id == *id) {
            self.bus.post(&Event::TaskUpdated { task: task.clone() });
        }
        self.bus.post(&Event::TaskListUpdated { tasks });
        Ok(())
    }

    /// Removes a task.
    ///
    /// On success posts `TaskRemoved` (terminating the entry's state
    /// machine) and then refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Backend`] if the backend rejects the
    /// removal (posted as `TaskRemovalFailed`).
    pub async fn remove(&self, id: &TaskId) -> Result<(), ServiceError> {
        match self.backend.remove_task(&self.list, id).await {
            Ok(()) => {
                tracing::info!(list = %self.list, id = %id, "task removed");
                self.bus.post(&Event::TaskRemoved { id: id.clone() });
                self.refresh().await.ok();
                Ok(())
            }
            Err(err) => {
                self.bus.post(&Event::TaskRemovalFailed {
                    id: id.clone(),
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Subscribes the service to the request events the UI posts
    /// (`TaskAddRequested`, `TaskUpdateRequested`, `TaskRemovalRequested`)
    /// and returns the handles so the owner can release them on teardown.
    ///
    /// Each request spawns the matching operation as a local task; the
    /// outcome arrives on the bus as usual.
    ///
    /// # Panics
    ///
    /// The spawned handlers run via [`tokio::task::spawn_local`], so this
    /// must be used within a [`tokio::task::LocalSet`].
    #[must_use]
    pub fn attach(service: Rc<Self>) -> Vec<Subscription> {
        let bus = service.bus.clone();

        let add_service = Rc::clone(&service);
        let add = bus.subscribe(EventType::TaskAddRequested, move |event| {
            if let Event::TaskAddRequested { description } = event {
                let service = Rc::clone(&add_service);
                let description = description.clone();
                task::spawn_local(async move {
                    service.add(&description).await.ok();
                });
            }
        });

        let update_service = Rc::clone(&service);
        let update = bus.subscribe(EventType::TaskUpdateRequested, move |event| {
            if let Event::TaskUpdateRequested {
                id,
                description,
                completed,
            } = event
            {
                let service = Rc::clone(&update_service);
                let id = id.clone();
                let description = description.clone();
                let completed = *completed;
                task::spawn_local(async move {
                    service.update(&id, &description, completed).await.ok();
                });
            }
        });

        let remove_service = Rc::clone(&service);
        let remove = bus.subscribe(EventType::TaskRemovalRequested, move |event| {
            if let Event::TaskRemovalRequested { id } = event {
                let service = Rc::clone(&remove_service);
                let id = id.clone();
                task::spawn_local(async move {
                    service.remove(&id).await.ok();
                });
            }
        });

        vec![add, update, remove]
    }
}

fn validate_description(raw: &str) -> Result<String, ValidationError> {
    let description = raw.trim();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(description.to_string())
}
