use std::fmt;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::model::task::{Task, TaskFields, TaskId};

/// The operations the client performs against the task API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Fetch,
    Create,
    Update,
    Complete,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Complete => "complete",
            Operation::Delete => "delete",
        }
    }

    /// Notice shown when the operation succeeds
    pub fn success_message(self) -> &'static str {
        match self {
            Operation::Load => "Tasks loaded.",
            Operation::Fetch => "Task found.",
            Operation::Create => "Task created successfully!",
            Operation::Update => "Task updated successfully!",
            Operation::Complete => "Task marked as completed!",
            Operation::Delete => "Task deleted successfully!",
        }
    }

    /// Generic message shown when the request itself failed
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => "Could not load tasks. Check that the backend is running.",
            Operation::Fetch => "Could not fetch task.",
            Operation::Create => "Could not create task.",
            Operation::Update => "Could not update task.",
            Operation::Complete => "Could not mark task as completed.",
            Operation::Delete => "Could not delete task.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way an API call can fail. All variants display as a message fit
/// to show the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Rejected before any request was sent
    #[error("{0}")]
    Validation(String),
    /// The server answered `success: false`
    #[error("{0}")]
    Server(String),
    /// Network failure or a response we could not read
    #[error("{}", .op.failure_message())]
    Transport { op: Operation, detail: String },
}

impl ApiError {
    fn transport(op: Operation, err: impl fmt::Display) -> Self {
        tracing::warn!(op = op.as_str(), error = %err, "request failed");
        ApiError::Transport {
            op,
            detail: err.to_string(),
        }
    }
}

/// Remote task resource. Implementations never panic on bad responses;
/// every failure comes back as an `ApiError`.
pub trait TaskApi: Send + Sync {
    fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;
    fn get_task(&self, id: &TaskId) -> Result<Task, ApiError>;
    fn create_task(&self, fields: &TaskFields) -> Result<Task, ApiError>;
    fn update_task(&self, id: &TaskId, fields: &TaskFields) -> Result<Task, ApiError>;
    fn complete_task(&self, id: &TaskId) -> Result<Task, ApiError>;
    fn delete_task(&self, id: &TaskId) -> Result<(), ApiError>;
}

/// Response body shared by every endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// Decode an envelope, mapping `success: false` to `ApiError::Server`.
fn decode<T: DeserializeOwned>(op: Operation, body: &str) -> Result<Option<T>, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| ApiError::transport(op, e))?;
    if envelope.success {
        Ok(envelope.data)
    } else {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| op.failure_message().to_string());
        tracing::info!(op = op.as_str(), reason = %message, "request rejected by server");
        Err(ApiError::Server(message))
    }
}

fn require<T>(op: Operation, data: Option<T>) -> Result<T, ApiError> {
    data.ok_or_else(|| ApiError::transport(op, "response envelope has no data"))
}

/// Blocking HTTP implementation of [`TaskApi`]
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    base_url: String,
    client: Client,
}

impl HttpTaskApi {
    /// Create a client for the API at `base_url`. `timeout: None` lets
    /// requests wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpTaskApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
    }

    fn send<T: DeserializeOwned>(
        &self,
        op: Operation,
        request: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        tracing::debug!(op = op.as_str(), "sending request");
        let response = request.send().map_err(|e| ApiError::transport(op, e))?;
        let status = response.status();
        let body = response.text().map_err(|e| ApiError::transport(op, e))?;
        tracing::debug!(op = op.as_str(), %status, "response received");
        decode(op, &body)
    }
}

impl TaskApi for HttpTaskApi {
    fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let op = Operation::Load;
        let data = self.send(op, self.request(Method::GET, self.tasks_url()))?;
        require(op, data)
    }

    fn get_task(&self, id: &TaskId) -> Result<Task, ApiError> {
        let op = Operation::Fetch;
        let data = self.send(op, self.request(Method::GET, self.task_url(id)))?;
        require(op, data)
    }

    fn create_task(&self, fields: &TaskFields) -> Result<Task, ApiError> {
        let op = Operation::Create;
        let data = self.send(op, self.request(Method::POST, self.tasks_url()).json(fields))?;
        require(op, data)
    }

    fn update_task(&self, id: &TaskId, fields: &TaskFields) -> Result<Task, ApiError> {
        let op = Operation::Update;
        let data = self.send(op, self.request(Method::PUT, self.task_url(id)).json(fields))?;
        require(op, data)
    }

    fn complete_task(&self, id: &TaskId) -> Result<Task, ApiError> {
        let op = Operation::Complete;
        let url = format!("{}/complete", self.task_url(id));
        let data = self.send(op, self.request(Method::PATCH, url))?;
        require(op, data)
    }

    fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        self.send::<IgnoredAny>(Operation::Delete, self.request(Method::DELETE, self.task_url(id)))
            .map(|_| ())
    }
}
