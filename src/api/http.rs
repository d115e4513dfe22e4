//! Task API over HTTP using `reqwest`.

use super::{ApiError, TodoApi};
use crate::domain::{NewTask, Task, TaskId};
use async_trait::async_trait;
use reqwest::{Response, Url};
use std::time::Duration;

/// HTTP client for the `/api/todos/` resource
pub struct HttpTodoApi {
    client: reqwest::Client,
    collection: Url,
}

impl HttpTodoApi {
    /// Build a client rooted at `base_url` (a trailing `/` is added if missing)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let collection = collection_url(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tododeck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, collection })
    }

    /// `{base}/api/todos/{id}/`
    pub fn item_url(&self, id: &TaskId) -> Result<Url, ApiError> {
        self.collection
            .join(&format!("{}/", id))
            .map_err(|e| ApiError::InvalidUrl {
                url: format!("{}{}/", self.collection, id),
                reason: e.to_string(),
            })
    }
}

fn collection_url(base_url: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut normalized = base_url.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let base = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("not a base URL".to_string()));
    }
    base.join("api/todos/").map_err(|e| invalid(e.to_string()))
}

/// Turn a non-2xx response into `ApiError::Status`
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        tracing::debug!("GET {}", self.collection);
        let response = check_status(self.client.get(self.collection.clone()).send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        tracing::debug!("POST {} title={:?}", self.collection, task.title);
        let response = check_status(
            self.client
                .post(self.collection.clone())
                .json(task)
                .send()
                .await?,
        )
        .await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn update(&self, task: &Task) -> Result<Task, ApiError> {
        let url = self.item_url(&task.id)?;
        tracing::debug!("PUT {}", url);
        let response = check_status(self.client.put(url).json(task).send().await?).await?;
        let body = response.text().await?;
        // Some servers answer 204 or an empty 200; the sent record is then authoritative
        if body.trim().is_empty() {
            return Ok(task.clone());
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        tracing::debug!("DELETE {}", url);
        check_status(self.client.delete(url).send().await?).await?;
        Ok(())
    }
}
