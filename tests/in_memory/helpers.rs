//! Shared test helpers for in-memory board integration tests.

use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;
use std::sync::Arc;
use taskboard::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::{ProjectId, Task, TaskData, TaskId, TaskPriority, TaskStatus},
};

/// Project every seeded task belongs to.
pub const PROJECT: &str = "project-alpha";

/// Fixed instant used for seeded timestamps.
#[must_use]
pub fn seeded_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Builds a task of [`PROJECT`] with fixed timestamps.
#[must_use]
pub fn seeded_task(id: &str, status: TaskStatus) -> Task {
    Task::from_data(TaskData {
        id: TaskId::from_raw(id),
        project_id: ProjectId::from_raw(PROJECT),
        name: format!("Task {id}"),
        description: String::new(),
        status,
        priority: TaskPriority::Medium,
        due_date: seeded_at() + chrono::Duration::days(14),
        created_at: seeded_at(),
        updated_at: seeded_at(),
    })
}

/// Provides a backend holding four tasks spread over three lanes.
#[fixture]
pub fn gateway() -> Arc<InMemoryTaskGateway> {
    let gateway = InMemoryTaskGateway::new();
    gateway.seed(seeded_task("t1", TaskStatus::Todo));
    gateway.seed(seeded_task("t2", TaskStatus::Todo));
    gateway.seed(seeded_task("t3", TaskStatus::InProgress));
    gateway.seed(seeded_task("t4", TaskStatus::Done));
    Arc::new(gateway)
}

/// Identifiers of `tasks` in order.
#[must_use]
pub fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id().as_str()).collect()
}
