//! Status-by-priority task counts for the analytics panel.

use super::{Task, TaskPriority, TaskStatus};
use serde::Serialize;

/// Task counts for one status, split by priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    /// Low-priority tasks.
    pub low: usize,
    /// Medium-priority tasks.
    pub medium: usize,
    /// High-priority tasks.
    pub high: usize,
}

impl PriorityBreakdown {
    /// Returns the count for `priority`.
    #[must_use]
    pub const fn get(&self, priority: TaskPriority) -> usize {
        match priority {
            TaskPriority::Low => self.low,
            TaskPriority::Medium => self.medium,
            TaskPriority::High => self.high,
        }
    }

    /// Returns the sum over all priorities.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.low + self.medium + self.high
    }

    const fn record(&mut self, priority: TaskPriority) {
        match priority {
            TaskPriority::Low => self.low += 1,
            TaskPriority::Medium => self.medium += 1,
            TaskPriority::High => self.high += 1,
        }
    }
}

/// Stacked status/priority counts over a set of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskAnalytics {
    rows: Vec<(TaskStatus, PriorityBreakdown)>,
}

impl TaskAnalytics {
    /// Tallies `tasks`, producing one row per status in board order.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut rows: Vec<(TaskStatus, PriorityBreakdown)> = TaskStatus::ALL
            .iter()
            .map(|status| (*status, PriorityBreakdown::default()))
            .collect();
        for task in tasks {
            if let Some((_, breakdown)) = rows.iter_mut().find(|(status, _)| *status == task.status())
            {
                breakdown.record(task.priority());
            }
        }
        Self { rows }
    }

    /// Returns the rows in board order.
    #[must_use]
    pub fn rows(&self) -> &[(TaskStatus, PriorityBreakdown)] {
        &self.rows
    }

    /// Returns the breakdown for `status`.
    #[must_use]
    pub fn for_status(&self, status: TaskStatus) -> PriorityBreakdown {
        self.rows
            .iter()
            .find(|(row_status, _)| *row_status == status)
            .map(|(_, breakdown)| *breakdown)
            .unwrap_or_default()
    }
}
