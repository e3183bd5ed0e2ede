//! Board session for one open project.

use super::drag::{DragSessionController, DragState, DropOutcome, PendingStatusChange};
use super::reconcile::{ReconcileError, ReconcileResult, ReconciliationClient};
use super::store::{TaskSnapshot, TaskStore};
use super::view::BoardView;
use crate::board::{
    domain::{NewTask, ProjectId, Task, TaskAnalytics, TaskId},
    ports::{TaskGateway, TaskGatewayError},
};
use crate::config::ReconcilePolicy;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A task API call failed.
    #[error(transparent)]
    Gateway(#[from] TaskGatewayError),
    /// Persisting a dropped card's status failed.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// Result type for board session operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Owner of the task store for one project.
///
/// Every component that reads or mutates the board goes through this
/// session or a handle it hands out.
pub struct BoardSession<G>
where
    G: TaskGateway + 'static,
{
    project_id: ProjectId,
    gateway: Arc<G>,
    store: TaskStore,
    drag: DragSessionController,
    reconciler: ReconciliationClient<G>,
}

impl<G> BoardSession<G>
where
    G: TaskGateway + 'static,
{
    /// Opens an empty board for `project_id`. Call [`Self::load`] to fetch
    /// its tasks.
    #[must_use]
    pub fn new(project_id: ProjectId, gateway: Arc<G>, policy: ReconcilePolicy) -> Self {
        let store = TaskStore::new();
        let reconciler = ReconciliationClient::new(Arc::clone(&gateway), &store, policy);
        Self {
            project_id,
            gateway,
            drag: DragSessionController::new(store.clone()),
            store,
            reconciler,
        }
    }

    /// Returns the open project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the store handle.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns the current store snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TaskSnapshot {
        self.store.snapshot()
    }

    /// Returns the drag session state.
    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Fetches the project's tasks, replacing the store contents and any
    /// local ordering.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when the fetch fails; the store is
    /// left unchanged.
    pub async fn load(&self) -> BoardResult<usize> {
        let tasks = self.gateway.list_by_project(&self.project_id).await?;
        let count = tasks.len();
        self.store.replace_all(tasks);
        info!(project_id = %self.project_id, count, "board loaded");
        Ok(count)
    }

    /// Creates a task and appends the authoritative copy to the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when the task API rejects the task.
    pub async fn create_task(&self, fields: NewTask) -> BoardResult<Task> {
        let task = self.gateway.create(&self.project_id, &fields).await?;
        self.store.append(task.clone());
        debug!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Replaces a task's editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when the task API rejects the update.
    pub async fn update_task(&self, task_id: &TaskId, fields: &NewTask) -> BoardResult<Task> {
        let task = self.gateway.update(task_id, fields).await?;
        self.store.update(task.clone());
        debug!(task_id = %task_id, "task updated");
        Ok(task)
    }

    /// Deletes a task, removing it from the board once the task API confirms.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Gateway`] when the deletion fails; the task
    /// stays on the board.
    pub async fn delete_task(&self, task_id: &TaskId) -> BoardResult<()> {
        self.gateway.delete(task_id).await?;
        self.store.remove(task_id);
        debug!(task_id = %task_id, "task deleted");
        Ok(())
    }

    /// Picks up a card. Returns `false` when the task is unknown.
    pub fn begin_drag(&mut self, dragged_id: &str) -> bool {
        self.drag.begin_drag(dragged_id)
    }

    /// Releases a card and applies the optimistic change.
    ///
    /// The returned outcome may carry a status change; pass it to
    /// [`Self::reconcile`] to persist it.
    pub fn end_drag(&mut self, dragged_id: &str, over_id: Option<&str>) -> DropOutcome {
        self.drag.end_drag(dragged_id, over_id)
    }

    /// Persists a status change. See [`ReconciliationClient::reconcile`].
    pub fn reconcile(
        &self,
        change: PendingStatusChange,
    ) -> impl Future<Output = ReconcileResult> + Send + 'static {
        self.reconciler.reconcile(change)
    }

    /// Releases a card and waits for the resulting status change, if any, to
    /// be persisted.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Reconcile`] when the status change failed. The
    /// drag session is idle either way.
    pub async fn drop_task(
        &mut self,
        dragged_id: &str,
        over_id: Option<&str>,
    ) -> BoardResult<DropOutcome> {
        let outcome = self.end_drag(dragged_id, over_id);
        if let Some(change) = outcome.pending().cloned() {
            self.reconcile(change).await?;
        }
        Ok(outcome)
    }

    /// Projects the current snapshot into lanes.
    #[must_use]
    pub fn view(&self) -> BoardView {
        BoardView::project(&self.store.snapshot())
    }

    /// Tallies the current tasks by status and priority.
    #[must_use]
    pub fn analytics(&self) -> TaskAnalytics {
        TaskAnalytics::from_tasks(&self.store.snapshot())
    }
}
