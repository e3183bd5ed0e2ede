//! Unit tests for the board module.


use crate::board::domain::{ProjectId, Task, TaskData, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Base instant used for every fixture timestamp.
pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Builds a task with fixed timestamps.
pub(super) fn task(id: &str, status: TaskStatus) -> Task {
    task_with_priority(id, status, TaskPriority::Medium)
}

/// Builds a task with fixed timestamps and the given priority.
pub(super) fn task_with_priority(id: &str, status: TaskStatus, priority: TaskPriority) -> Task {
    Task::from_data(TaskData {
        id: TaskId::from_raw(id),
        project_id: ProjectId::from_raw("project-1"),
        name: format!("Task {id}"),
        description: String::new(),
        status,
        priority,
        due_date: base_time() + chrono::Duration::days(7),
        created_at: base_time(),
        updated_at: base_time(),
    })
}

/// Identifiers of `tasks` in order.
pub(super) fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id().as_str()).collect()
}

/// Clock that advances one minute on every reading.
#[derive(Debug)]
pub(super) struct SteppingClock {
    minutes: AtomicI64,
}

impl SteppingClock {
    pub(super) const fn new() -> Self {
        Self {
            minutes: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let step = self.minutes.fetch_add(1, Ordering::SeqCst) + 1;
        base_time() + chrono::Duration::minutes(step)
    }
}
