//! # Todo Client HTTP
//!
//! The reqwest implementation of the
//! [`TodoBackend`](todo_client_core::backend::TodoBackend) contract.
//!
//! Every call follows the same shape: build the request, attach the
//! `X-Todo-Token` header if a session token is stored, send, and translate
//! the outcome. HTTP 200 is success; any other status becomes
//! [`BackendError::Status`] without further distinction, matching the
//! server's coarse contract. Nothing here is retried: a failure is the
//! caller's to surface.
//!
//! ## Consumed surface
//!
//! - `GET    /lists/{listId}`: all tasks of a list
//! - `POST   /lists/{listId}/{taskId}`: add a task (client-chosen id)
//! - `PUT    /lists/{listId}/{taskId}`: update/complete a task
//! - `DELETE /lists/{listId}/{taskId}`: remove a task
//! - `GET    /lists`, `POST /lists/{listId}`: list management
//! - `POST   /auth` (Basic), `GET /auth`, `DELETE /auth`: session tokens

mod dto;

use crate::dto::{AddTaskBody, TaskDto, UpdateTaskBody};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use std::sync::Arc;
use todo_client_core::backend::{BackendError, BackendFuture, TodoBackend};
use todo_client_core::session::{AuthToken, Session};
use todo_client_core::task::{Task, TaskId, TodoListId};

/// Header carrying the session token on every authenticated request.
const TOKEN_HEADER: &str = "X-Todo-Token";

/// HTTP client for the todo backend.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    session: Arc<Session>,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url` (no trailing slash),
    /// authenticating with whatever token `session` currently holds.
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}/{path}", self.base_url));
        if let Some(token) = self.session.token() {
            builder = builder.header(TOKEN_HEADER, token.as_str());
        }
        builder
    }

    /// Sends a request whose only interesting outcome is success.
    async fn send_expecting_ok(&self, builder: RequestBuilder) -> Result<(), BackendError> {
        let response = builder.send().await.map_err(transport)?;
        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(BackendError::Status(status.as_u16())),
        }
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

fn decode(err: reqwest::Error) -> BackendError {
    BackendError::Decode(err.to_string())
}

impl TodoBackend for HttpBackend {
    fn all_tasks<'a>(&'a self, list: &'a TodoListId) -> BackendFuture<'a, Vec<Task>> {
        Box::pin(async move {
            let response = self
                .request(Method::GET, &format!("lists/{list}"))
                .send()
                .await
                .map_err(transport)?;
            match response.status() {
                StatusCode::OK => {
                    let dtos: Vec<TaskDto> = response.json().await.map_err(decode)?;
                    tracing::debug!(list = %list, count = dtos.len(), "fetched tasks");
                    dtos.into_iter().map(Task::try_from).collect()
                }
                status => Err(BackendError::Status(status.as_u16())),
            }
        })
    }

    fn add_task<'a>(
        &'a self,
        list: &'a TodoListId,
        task: &'a TaskId,
        description: &'a str,
    ) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let builder = self
                .request(Method::POST, &format!("lists/{list}/{task}"))
                .json(&AddTaskBody {
                    task_description: description,
                });
            self.send_expecting_ok(builder).await
        })
    }

    fn update_task<'a>(
        &'a self,
        list: &'a TodoListId,
        task: &'a TaskId,
        description: &'a str,
        completed: bool,
    ) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let builder = self
                .request(Method::PUT, &format!("lists/{list}/{task}"))
                .json(&UpdateTaskBody {
                    task_status: completed,
                    task_description: description,
                });
            self.send_expecting_ok(builder).await
        })
    }

    fn remove_task<'a>(
        &'a self,
        list: &'a TodoListId,
        task: &'a TaskId,
    ) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let builder = self.request(Method::DELETE, &format!("lists/{list}/{task}"));
            self.send_expecting_ok(builder).await
        })
    }

    fn all_lists(&self) -> BackendFuture<'_, Vec<TodoListId>> {
        Box::pin(async move {
            let response = self
                .request(Method::GET, "lists")
                .send()
                .await
                .map_err(transport)?;
            match response.status() {
                StatusCode::OK => {
                    let ids: Vec<String> = response.json().await.map_err(decode)?;
                    ids.into_iter()
                        .map(|raw| {
                            TodoListId::new(raw)
                                .map_err(|err| BackendError::Decode(err.to_string()))
                        })
                        .collect()
                }
                status => Err(BackendError::Status(status.as_u16())),
            }
        })
    }

    fn create_list<'a>(&'a self, list: &'a TodoListId) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let builder = self.request(Method::POST, &format!("lists/{list}"));
            self.send_expecting_ok(builder).await
        })
    }

    fn sign_in<'a>(
        &'a self,
        username: &'a str,
        password: &'a str,
    ) -> BackendFuture<'a, AuthToken> {
        Box::pin(async move {
            // Credentials travel as Basic auth; the token comes back as the
            // raw response body.
            let response = self
                .client
                .post(format!("{}/auth", self.base_url))
                .basic_auth(username, Some(password))
                .send()
                .await
                .map_err(transport)?;
            match response.status() {
                StatusCode::OK => {
                    let token = response.text().await.map_err(decode)?;
                    let token = token.trim();
                    if token.is_empty() {
                        return Err(BackendError::Decode(
                            "empty token in sign-in response".to_string(),
                        ));
                    }
                    Ok(AuthToken::new(token))
                }
                status => Err(BackendError::Status(status.as_u16())),
            }
        })
    }

    fn check_session(&self) -> BackendFuture<'_, ()> {
        Box::pin(async move {
            let builder = self.request(Method::GET, "auth");
            self.send_expecting_ok(builder).await
        })
    }

    fn sign_out(&self) -> BackendFuture<'_, ()> {
        Box::pin(async move {
            let builder = self.request(Method::DELETE, "auth");
            self.send_expecting_ok(builder).await
        })
    }
}
