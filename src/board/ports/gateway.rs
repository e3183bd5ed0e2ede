//! Gateway port for the task API the board persists through.

use crate::board::domain::{NewTask, ProjectId, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task gateway operations.
pub type TaskGatewayResult<T> = Result<T, TaskGatewayError>;

/// Contract of the external task persistence collaborator.
///
/// Every call is a single request; implementations never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Lists the tasks of a project in backend insertion order.
    async fn list_by_project(&self, project_id: &ProjectId) -> TaskGatewayResult<Vec<Task>>;

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] when the task does not exist.
    async fn get(&self, task_id: &TaskId) -> TaskGatewayResult<Task>;

    /// Creates a task in `project_id` and returns the authoritative record.
    async fn create(&self, project_id: &ProjectId, fields: &NewTask) -> TaskGatewayResult<Task>;

    /// Replaces every editable field of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] when the task does not exist.
    async fn update(&self, task_id: &TaskId, fields: &NewTask) -> TaskGatewayResult<Task>;

    /// Sets the status of a task and returns the authoritative record.
    ///
    /// Repeating the call with the same arguments leaves the backend in the
    /// same state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::NotFound`] when the task was deleted or
    /// [`TaskGatewayError::Validation`] when the backend rejects the status.
    async fn update_status(&self, task_id: &TaskId, status: TaskStatus)
    -> TaskGatewayResult<Task>;

    /// Deletes a task.
    async fn delete(&self, task_id: &TaskId) -> TaskGatewayResult<()>;
}

/// Errors returned by task gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskGatewayError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The backend rejected the request payload.
    #[error("request rejected: {0}")]
    Validation(String),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Network or backend failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskGatewayError {
    /// Wraps a transport error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
