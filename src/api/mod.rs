pub mod dispatch;
pub mod http;

pub use dispatch::{Completion, Dispatcher, Request, UpdateOrigin};
pub use http::HttpTodoApi;

use crate::domain::{NewTask, Task, TaskId};
use async_trait::async_trait;

/// Errors talking to the task API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection, TLS or timeout failure
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Body wasn't the expected JSON shape
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// The four REST calls behind the task list
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// `GET /api/todos/`
    async fn list(&self) -> Result<Vec<Task>, ApiError>;

    /// `POST /api/todos/`, returns the record with its assigned id
    async fn create(&self, task: &NewTask) -> Result<Task, ApiError>;

    /// `PUT /api/todos/{id}/` with the full record
    async fn update(&self, task: &Task) -> Result<Task, ApiError>;

    /// `DELETE /api/todos/{id}/`
    async fn delete(&self, id: &TaskId) -> Result<(), ApiError>;
}
