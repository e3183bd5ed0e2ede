//! Shared world state for board drag-and-drop BDD scenarios.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use rstest::fixture;
use taskboard::{
    board::{
        adapters::memory::InMemoryTaskGateway,
        domain::{NewTask, ProjectId, Task, TaskId, TaskStatus},
        ports::{TaskGateway, TaskGatewayResult},
        services::{BoardResult, BoardSession, DropOutcome},
    },
    config::ReconcilePolicy,
};

/// Project every scenario board is opened for.
pub const PROJECT: &str = "bdd-project";

/// In-memory task API that counts status writes.
#[derive(Default)]
pub struct CountingGateway {
    inner: InMemoryTaskGateway,
    status_updates: AtomicUsize,
}

impl CountingGateway {
    /// Seeds a task directly into the backend.
    pub fn seed(&self, task: Task) {
        self.inner.seed(task);
    }

    /// Number of status writes received so far.
    #[must_use]
    pub fn status_updates(&self) -> usize {
        self.status_updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskGateway for CountingGateway {
    async fn list_by_project(&self, project_id: &ProjectId) -> TaskGatewayResult<Vec<Task>> {
        self.inner.list_by_project(project_id).await
    }

    async fn get(&self, task_id: &TaskId) -> TaskGatewayResult<Task> {
        self.inner.get(task_id).await
    }

    async fn create(&self, project_id: &ProjectId, fields: &NewTask) -> TaskGatewayResult<Task> {
        self.inner.create(project_id, fields).await
    }

    async fn update(&self, task_id: &TaskId, fields: &NewTask) -> TaskGatewayResult<Task> {
        self.inner.update(task_id, fields).await
    }

    async fn update_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> TaskGatewayResult<Task> {
        self.status_updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_status(task_id, status).await
    }

    async fn delete(&self, task_id: &TaskId) -> TaskGatewayResult<()> {
        self.inner.delete(task_id).await
    }
}

/// Scenario world for board drag behaviour tests.
pub struct BoardDragWorld {
    pub gateway: Arc<CountingGateway>,
    pub session: BoardSession<CountingGateway>,
    pub last_drop: Option<BoardResult<DropOutcome>>,
}

impl BoardDragWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub fn new() -> Self {
        let gateway = Arc::new(CountingGateway::default());
        let session = BoardSession::new(
            ProjectId::from_raw(PROJECT),
            Arc::clone(&gateway),
            ReconcilePolicy::default(),
        );

        Self {
            gateway,
            session,
            last_drop: None,
        }
    }
}

impl Default for BoardDragWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardDragWorld {
    BoardDragWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
