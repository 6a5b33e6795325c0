//! Scripted in-memory backend.
//!
//! [`StubBackend`] answers every [`TodoBackend`] operation synchronously
//! from scripted state and records how often each operation was called, so
//! tests can assert both outcomes and the absence of network traffic (for
//! example: validation failures must show a call count of zero).

use std::collections::{HashMap, VecDeque};
use std::future::ready;
use std::sync::{Mutex, PoisonError};
use todo_client_core::backend::{BackendError, BackendFuture, TodoBackend};
use todo_client_core::session::AuthToken;
use todo_client_core::task::{Task, TaskId, TodoListId};

/// One operation of the [`TodoBackend`] surface, used as a call-count and
/// failure-scripting key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendCall {
    /// `all_tasks`
    AllTasks,
    /// `add_task`
    AddTask,
    /// `update_task`
    UpdateTask,
    /// `remove_task`
    RemoveTask,
    /// `all_lists`
    AllLists,
    /// `create_list`
    CreateList,
    /// `sign_in`
    SignIn,
    /// `check_session`
    CheckSession,
    /// `sign_out`
    SignOut,
}

#[derive(Default)]
struct StubState {
    tasks: Vec<Task>,
    lists: Vec<TodoListId>,
    failures: HashMap<BackendCall, VecDeque<BackendError>>,
    counts: HashMap<BackendCall, usize>,
    last_added_description: Option<String>,
}

/// Scripted [`TodoBackend`] double.
///
/// By default every operation succeeds: `all_tasks`/`all_lists` answer with
/// whatever was scripted via [`put_tasks`](Self::put_tasks) /
/// [`put_lists`](Self::put_lists) (initially empty), mutations answer
/// `Ok(())`, and `sign_in` issues a fixed token. A failure scripted with
/// [`fail_next`](Self::fail_next) is consumed by the next matching call.
#[derive(Default)]
pub struct StubBackend {
    state: Mutex<StubState>,
}

impl StubBackend {
    /// Creates a stub with empty state and no scripted failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a valid incomplete task for scripting responses.
    ///
    /// # Panics
    ///
    /// Panics if `id` or `description` are blank; both come from test code.
    #[allow(clippy::unwrap_used)] // Test helper, inputs are literals
    #[must_use]
    pub fn sample_task(id: &str, description: &str) -> Task {
        Task::new(
            TaskId::new(id).unwrap(),
            description,
            chrono::Utc::now(),
        )
        .unwrap()
    }

    /// Scripts the canonical task list returned by `all_tasks`.
    pub fn put_tasks(&self, tasks: Vec<Task>) {
        self.lock().tasks = tasks;
    }

    /// Scripts the list ids returned by `all_lists`.
    pub fn put_lists(&self, lists: Vec<TodoListId>) {
        self.lock().lists = lists;
    }

    /// Scripts the next call to `call` to fail with `error`. Repeated
    /// scripts queue up and are consumed in order.
    pub fn fail_next(&self, call: BackendCall, error: BackendError) {
        self.lock().failures.entry(call).or_default().push_back(error);
    }

    /// How often `call` has been invoked.
    #[must_use]
    pub fn calls(&self, call: BackendCall) -> usize {
        self.lock().counts.get(&call).copied().unwrap_or(0)
    }

    /// The description passed to the most recent `add_task`.
    #[must_use]
    pub fn last_added_description(&self) -> Option<String> {
        self.lock().last_added_description.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bumps the counter and pops a scripted failure, if any.
    fn record(&self, call: BackendCall) -> Option<BackendError> {
        let mut state = self.lock();
        *state.counts.entry(call).or_insert(0) += 1;
        state
            .failures
            .get_mut(&call)
            .and_then(VecDeque::pop_front)
    }
}

impl TodoBackend for StubBackend {
    fn all_tasks<'a>(&'a self, _list: &'a TodoListId) -> BackendFuture<'a, Vec<Task>> {
        let result = match self.record(BackendCall::AllTasks) {
            Some(error) => Err(error),
            None => Ok(self.lock().tasks.clone()),
        };
        Box::pin(ready(result))
    }

    fn add_task<'a>(
        &'a self,
        _list: &'a TodoListId,
        _task: &'a TaskId,
        description: &'a str,
    ) -> BackendFuture<'a, ()> {
        let result = match self.record(BackendCall::AddTask) {
            Some(error) => Err(error),
            None => {
                self.lock().last_added_description = Some(description.to_string());
                Ok(())
            }
        };
        Box::pin(ready(result))
    }

    fn update_task<'a>(
        &'a self,
        _list: &'a TodoListId,
        _task: &'a TaskId,
        _description: &'a str,
        _completed: bool,
    ) -> BackendFuture<'a, ()> {
        let result = match self.record(BackendCall::UpdateTask) {
            Some(error) => Err(error),
            None => Ok(()),
        };
        Box::pin(ready(result))
    }

    fn remove_task<'a>(
        &'a self,
        _list: &'a TodoListId,
        _task: &'a TaskId,
    ) -> BackendFuture<'a, ()> {
        let result = match self.record(BackendCall::RemoveTask) {
            Some(error) => Err(error),
            None => Ok(()),
        };
        Box::pin(ready(result))
    }

    fn all_lists(&self) -> BackendFuture<'_, Vec<TodoListId>> {
        let result = match self.record(BackendCall::AllLists) {
            Some(error) => Err(error),
            None => Ok(self.lock().lists.clone()),
        };
        Box::pin(ready(result))
    }

    fn create_list<'a>(&'a self, _list: &'a TodoListId) -> BackendFuture<'a, ()> {
        let result = match self.record(BackendCall::CreateList) {
            Some(error) => Err(error),
            None => Ok(()),
        };
        Box::pin(ready(result))
    }

    fn sign_in<'a>(
        &'a self,
        _username: &'a str,
        _password: &'a str,
    ) -> BackendFuture<'a, AuthToken> {
        let result = match self.record(BackendCall::SignIn) {
            Some(error) => Err(error),
            None => Ok(AuthToken::new("stub-token")),
        };
        Box::pin(ready(result))
    }

    fn check_session(&self) -> BackendFuture<'_, ()> {
        let result = match self.record(BackendCall::CheckSession) {
            Some(error) => Err(error),
            None => Ok(()),
        };
        Box::pin(ready(result))
    }

    fn sign_out(&self) -> BackendFuture<'_, ()> {
        let result = match self.record(BackendCall::SignOut) {
            Some(error) => Err(error),
            None => Ok(()),
        };
        Box::pin(ready(result))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    fn list() -> TodoListId {
        TodoListId::new("l-1").unwrap()
    }

    #[test]
    fn counts_and_scripted_failures() {
        let stub = StubBackend::new();
        stub.fail_next(BackendCall::AllTasks, BackendError::Status(500));

        let first = futures_now(stub.all_tasks(&list()));
        let second = futures_now(stub.all_tasks(&list()));

        assert!(first.is_err());
        assert!(second.is_ok());
        assert_eq!(stub.calls(BackendCall::AllTasks), 2);
    }

    #[test]
    fn put_tasks_round_trip() {
        let stub = StubBackend::new();
        stub.put_tasks(vec![StubBackend::sample_task("t-1", "scripted")]);

        let tasks = futures_now(stub.all_tasks(&list())).unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "scripted");
    }

    /// The stub's futures are always immediately ready.
    fn futures_now<T>(mut future: BackendFuture<'_, T>) -> Result<T, BackendError> {
        use std::future::Future;
        use std::task::{Context, Poll, Waker};
        let mut context = Context::from_waker(Waker::noop());
        match future.as_mut().poll(&mut context) {
            Poll::Ready(result) => result,
            Poll::Pending => Err(BackendError::Transport(
                "stub future unexpectedly pending".to_string(),
            )),
        }
    }
}
