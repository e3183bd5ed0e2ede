//! Static lane registry.
//!
//! The board has exactly four lanes, fixed at compile time. Lane identifiers
//! are camel-case words and never collide with task identifiers, which are
//! UUIDs issued by the task API.

use super::TaskStatus;
use serde::Serialize;

/// One fixed status column on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Lane {
    id: &'static str,
    name: &'static str,
    status: TaskStatus,
}

impl Lane {
    const fn new(id: &'static str, name: &'static str, status: TaskStatus) -> Self {
        Self { id, name, status }
    }

    /// Returns the droppable identifier of the lane.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the status assigned to tasks dropped on this lane.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }
}

/// Lanes in display order.
pub const LANES: [Lane; 4] = [
    Lane::new("todo", "Todo", TaskStatus::Todo),
    Lane::new("inProgress", "In Progress", TaskStatus::InProgress),
    Lane::new("inReview", "In Review", TaskStatus::InReview),
    Lane::new("done", "Done", TaskStatus::Done),
];

/// Lookup helpers over [`LANES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusRegistry;

impl StatusRegistry {
    /// Returns all lanes in display order.
    #[must_use]
    pub const fn lanes() -> &'static [Lane] {
        &LANES
    }

    /// Finds the lane with droppable identifier `id`.
    #[must_use]
    pub fn find(id: &str) -> Option<&'static Lane> {
        Self::lanes().iter().find(|lane| lane.id == id)
    }

    /// Returns the lane that renders tasks with `status`.
    #[must_use]
    pub fn lane_for(status: TaskStatus) -> Option<&'static Lane> {
        Self::lanes().iter().find(|lane| lane.status == status)
    }
}
