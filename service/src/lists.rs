//! List-of-lists operations.

use crate::error::ServiceError;
use std::sync::Arc;
use todo_client_core::backend::TodoBackend;
use todo_client_core::task::TodoListId;

/// Facade over the `/lists` management surface.
pub struct TodoListsService {
    backend: Arc<dyn TodoBackend>,
}

impl TodoListsService {
    /// Creates a facade over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn TodoBackend>) -> Self {
        Self { backend }
    }

    /// Fetches the ids of every list owned by the session.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Backend`] if the fetch fails.
    pub async fn all_lists(&self) -> Result<Vec<TodoListId>, ServiceError> {
        Ok(self.backend.all_lists().await?)
    }

    /// Creates an empty list with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Backend`] if the creation fails.
    pub async fn create(&self, list: &TodoListId) -> Result<(), ServiceError> {
        self.backend.create_list(list).await?;
        tracing::info!(list = %list, "list created");
        Ok(())
    }
}
