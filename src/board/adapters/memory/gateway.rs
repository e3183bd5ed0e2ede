//! In-memory task API used for tests and local demos.

use crate::board::{
    domain::{NewTask, ProjectId, Task, TaskId, TaskStatus},
    ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
};
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory task backend.
///
/// Keeps tasks in insertion order, the way the task API returns them, and
/// stamps timestamps from the injected clock.
pub struct InMemoryTaskGateway<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<Vec<Task>>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl InMemoryTaskGateway<DefaultClock> {
    /// Creates an empty backend using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskGateway<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty backend using `clock` for timestamps.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Vec::new())),
            clock,
        }
    }

    /// Inserts an already-built task, bypassing creation.
    pub fn seed(&self, task: Task) {
        self.write().push(task);
    }

    /// Returns the stored copy of a task, if present.
    #[must_use]
    pub fn stored(&self, task_id: &TaskId) -> Option<Task> {
        self.read().iter().find(|task| task.id() == task_id).cloned()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Task>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Task>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `mutate` to the stored task and returns the updated copy.
    fn modify(
        &self,
        task_id: &TaskId,
        mutate: impl FnOnce(&mut Task, &C),
    ) -> TaskGatewayResult<Task> {
        let mut tasks = self.write();
        let task = tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
            .ok_or_else(|| TaskGatewayError::NotFound(task_id.clone()))?;
        mutate(task, &*self.clock);
        Ok(task.clone())
    }
}

#[async_trait]
impl<C> TaskGateway for InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    async fn list_by_project(&self, project_id: &ProjectId) -> TaskGatewayResult<Vec<Task>> {
        Ok(self
            .read()
            .iter()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn get(&self, task_id: &TaskId) -> TaskGatewayResult<Task> {
        self.stored(task_id)
            .ok_or_else(|| TaskGatewayError::NotFound(task_id.clone()))
    }

    async fn create(&self, project_id: &ProjectId, fields: &NewTask) -> TaskGatewayResult<Task> {
        if fields.name().trim().is_empty() {
            return Err(TaskGatewayError::Validation(
                "task name must not be empty".to_owned(),
            ));
        }
        let task = Task::create(project_id.clone(), fields, &*self.clock);
        self.write().push(task.clone());
        Ok(task)
    }

    async fn update(&self, task_id: &TaskId, fields: &NewTask) -> TaskGatewayResult<Task> {
        self.modify(task_id, |task, clock| task.apply(fields, clock))
    }

    async fn update_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> TaskGatewayResult<Task> {
        self.modify(task_id, |task, clock| task.change_status(status, clock))
    }

    async fn delete(&self, task_id: &TaskId) -> TaskGatewayResult<()> {
        // The task API answers deletes of unknown ids with success.
        self.write().retain(|task| task.id() != task_id);
        Ok(())
    }
}
