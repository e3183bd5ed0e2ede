//! Lane-by-lane projection of a store snapshot for rendering.

use super::store::TaskSnapshot;
use crate::board::domain::{Lane, StatusRegistry, Task};
use serde::Serialize;

/// Tasks shown in one lane, in store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneView {
    lane: &'static Lane,
    tasks: Vec<Task>,
}

impl LaneView {
    /// Returns the lane.
    #[must_use]
    pub const fn lane(&self) -> &'static Lane {
        self.lane
    }

    /// Returns the lane's tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the lane.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// All lanes of the board in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    lanes: Vec<LaneView>,
}

impl BoardView {
    /// Splits `snapshot` into lanes. Tasks whose status has no lane are left
    /// out.
    #[must_use]
    pub fn project(snapshot: &TaskSnapshot) -> Self {
        let lanes = StatusRegistry::lanes()
            .iter()
            .map(|lane| LaneView {
                lane,
                tasks: snapshot
                    .iter()
                    .filter(|task| task.status() == lane.status())
                    .cloned()
                    .collect(),
            })
            .collect();
        Self { lanes }
    }

    /// Returns the lanes in display order.
    #[must_use]
    pub fn lanes(&self) -> &[LaneView] {
        &self.lanes
    }

    /// Returns the lane with droppable identifier `lane_id`.
    #[must_use]
    pub fn lane(&self, lane_id: &str) -> Option<&LaneView> {
        self.lanes.iter().find(|view| view.lane.id() == lane_id)
    }

    /// Returns the task identifiers of a lane in display order.
    #[must_use]
    pub fn lane_task_ids(&self, lane_id: &str) -> Vec<&str> {
        self.lane(lane_id)
            .map(|view| view.tasks.iter().map(|task| task.id().as_str()).collect())
            .unwrap_or_default()
    }
}
