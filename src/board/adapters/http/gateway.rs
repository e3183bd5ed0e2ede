//! REST client for the task API.

use crate::board::{
    domain::{NewTask, ProjectId, Task, TaskId, TaskStatus},
    ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
};
use crate::config::BoardConfig;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Non-success HTTP status returned by the task API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("HTTP {status} from {method} {path}")]
pub struct HttpStatusError {
    /// Response status code.
    pub status: u16,
    /// Request method.
    pub method: String,
    /// Request path.
    pub path: String,
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: TaskStatus,
}

/// Task gateway backed by the task API's REST routes.
///
/// Authentication is cookie based; the client keeps a cookie store so a
/// session cookie obtained elsewhere is replayed on every call.
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: Client,
    base_url: String,
}

impl HttpTaskGateway {
    /// Builds a client for `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &BoardConfig) -> TaskGatewayResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .map_err(TaskGatewayError::transport)?;
        Ok(Self::with_client(client, &config.api_base_url))
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the absolute URL for a path under `/api/tasks`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/tasks/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(method = %method, url = %url, "task API request");
        self.client.request(method, url)
    }

    async fn send(
        builder: RequestBuilder,
        method: &Method,
        path: &str,
        task_id: Option<&TaskId>,
    ) -> TaskGatewayResult<Response> {
        let response = builder.send().await.map_err(TaskGatewayError::transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, method, path, task_id, body))
    }

    async fn task_response(response: Response, task_id: Option<&TaskId>) -> TaskGatewayResult<Task> {
        let bytes = response.bytes().await.map_err(TaskGatewayError::transport)?;
        task_from_body(&bytes, task_id)
    }
}

/// Decodes a single-task body.
///
/// The API answers 200 with an empty body when an update matched no row.
fn task_from_body(bytes: &[u8], task_id: Option<&TaskId>) -> TaskGatewayResult<Task> {
    let task: Option<Task> = decode_body(bytes)?;
    task.ok_or_else(|| match task_id {
        Some(id) => TaskGatewayError::NotFound(id.clone()),
        None => TaskGatewayError::Decode("empty task response".to_owned()),
    })
}

/// Decodes a task list row by row, skipping rows that are not valid tasks.
fn tasks_from_body(bytes: &[u8]) -> TaskGatewayResult<Vec<Task>> {
    let rows: Vec<serde_json::Value> = decode_body(bytes)?.unwrap_or_default();
    Ok(rows
        .into_iter()
        .filter_map(|row| {
            serde_json::from_value::<Task>(row)
                .inspect_err(|err| warn!(error = %err, "skipping task row that cannot be decoded"))
                .ok()
        })
        .collect())
}

fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> TaskGatewayResult<Option<T>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes).map_err(|err| TaskGatewayError::Decode(err.to_string()))
}

/// Maps a non-success response onto the gateway error taxonomy.
fn classify_failure(
    status: StatusCode,
    method: &Method,
    path: &str,
    task_id: Option<&TaskId>,
    body: String,
) -> TaskGatewayError {
    match (status, task_id) {
        (StatusCode::NOT_FOUND, Some(id)) => TaskGatewayError::NotFound(id.clone()),
        (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
            TaskGatewayError::Validation(body)
        }
        _ => TaskGatewayError::transport(HttpStatusError {
            status: status.as_u16(),
            method: method.to_string(),
            path: path.to_owned(),
        }),
    }
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn list_by_project(&self, project_id: &ProjectId) -> TaskGatewayResult<Vec<Task>> {
        let path = project_id.as_str();
        let builder = self.request(Method::GET, path);
        let response = Self::send(builder, &Method::GET, path, None).await?;
        let bytes = response.bytes().await.map_err(TaskGatewayError::transport)?;
        tasks_from_body(&bytes)
    }

    async fn get(&self, task_id: &TaskId) -> TaskGatewayResult<Task> {
        let path = format!("{task_id}/task");
        let builder = self.request(Method::GET, &path);
        let response = Self::send(builder, &Method::GET, &path, Some(task_id)).await?;
        Self::task_response(response, Some(task_id)).await
    }

    async fn create(&self, project_id: &ProjectId, fields: &NewTask) -> TaskGatewayResult<Task> {
        let path = project_id.as_str();
        let builder = self.request(Method::POST, path).json(fields);
        let response = Self::send(builder, &Method::POST, path, None).await?;
        Self::task_response(response, None).await
    }

    async fn update(&self, task_id: &TaskId, fields: &NewTask) -> TaskGatewayResult<Task> {
        let path = format!("{task_id}/update");
        let builder = self.request(Method::PUT, &path).json(fields);
        let response = Self::send(builder, &Method::PUT, &path, Some(task_id)).await?;
        Self::task_response(response, Some(task_id)).await
    }

    async fn update_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> TaskGatewayResult<Task> {
        let path = task_id.as_str();
        let builder = self
            .request(Method::PATCH, path)
            .json(&StatusBody { status });
        let response = Self::send(builder, &Method::PATCH, path, Some(task_id)).await?;
        Self::task_response(response, Some(task_id)).await
    }

    async fn delete(&self, task_id: &TaskId) -> TaskGatewayResult<()> {
        let path = task_id.as_str();
        let builder = self.request(Method::DELETE, path);
        // The delete response body is not meaningful; only the status is.
        Self::send(builder, &Method::DELETE, path, Some(task_id)).await?;
        Ok(())
    }
}
