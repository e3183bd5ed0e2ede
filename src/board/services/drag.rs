//! Drag session state machine and drop handling.
//!
//! A drag starts when a card is picked up and always ends idle when it is
//! released. On release the controller resolves what the card was dropped
//! on and applies the resulting change to the store immediately. Status
//! changes come back as a [`PendingStatusChange`] for the caller to persist;
//! positional reordering is client-local and never persisted.

use super::store::{StatusWrite, TaskSnapshot, TaskStore};
use crate::board::domain::{Lane, StatusRegistry, Task, TaskId, TaskStatus};
use tracing::debug;

/// State of the drag session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No card is being dragged.
    #[default]
    Idle,
    /// A card is being dragged.
    Dragging(Task),
}

/// What a drop target identifier refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A lane; the dragged task takes the lane's status.
    Lane(&'static Lane),
    /// Another task; the dragged task takes its status and position.
    Task(Task),
}

/// Resolves a droppable identifier against the lanes, then the tasks of
/// `snapshot`. Lanes win if an identifier matches both.
#[must_use]
pub fn resolve_drop_target(snapshot: &TaskSnapshot, target_id: &str) -> Option<DropTarget> {
    StatusRegistry::find(target_id)
        .map(DropTarget::Lane)
        .or_else(|| snapshot.get(target_id).cloned().map(DropTarget::Task))
}

/// Optimistic status change awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStatusChange {
    previous: Task,
    optimistic: Task,
}

impl PendingStatusChange {
    /// Returns the identifier of the changed task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        self.optimistic.id()
    }

    /// Returns the status to persist.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.optimistic.status()
    }

    /// Returns the task as it was before the drop.
    #[must_use]
    pub const fn previous(&self) -> &Task {
        &self.previous
    }

    /// Returns the task as the store shows it after the drop.
    #[must_use]
    pub const fn optimistic(&self) -> &Task {
        &self.optimistic
    }
}

impl From<StatusWrite> for PendingStatusChange {
    fn from(write: StatusWrite) -> Self {
        Self {
            previous: write.previous,
            optimistic: write.current,
        }
    }
}

/// Result of releasing a dragged card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Released outside any droppable area.
    Cancelled,
    /// The dragged task or the drop target could not be found, or the card
    /// was dropped on itself.
    Ignored,
    /// Dropped on a lane.
    MovedToLane {
        /// Lane the task was dropped on.
        lane: &'static Lane,
        /// Status change to persist.
        pending: PendingStatusChange,
    },
    /// Dropped on another task.
    Reordered {
        /// Previous store position of the dragged task.
        from: usize,
        /// New store position of the dragged task.
        to: usize,
        /// Status change to persist when the drop crossed lanes.
        pending: Option<PendingStatusChange>,
    },
}

impl DropOutcome {
    /// Returns the status change to persist, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingStatusChange> {
        match self {
            Self::MovedToLane { pending, .. }
            | Self::Reordered {
                pending: Some(pending),
                ..
            } => Some(pending),
            Self::Cancelled | Self::Ignored | Self::Reordered { pending: None, .. } => None,
        }
    }
}

/// Tracks the dragged card and turns drops into store mutations.
#[derive(Debug, Clone)]
pub struct DragSessionController {
    store: TaskStore,
    state: DragState,
}

impl DragSessionController {
    /// Creates an idle controller over `store`.
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        Self {
            store,
            state: DragState::Idle,
        }
    }

    /// Returns the current drag state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns the dragged task, if a drag is in progress.
    #[must_use]
    pub const fn active_task(&self) -> Option<&Task> {
        match &self.state {
            DragState::Dragging(task) => Some(task),
            DragState::Idle => None,
        }
    }

    /// Starts dragging the task with identifier `dragged_id`.
    ///
    /// Stays idle and returns `false` when the task is not in the store.
    pub fn begin_drag(&mut self, dragged_id: &str) -> bool {
        let snapshot = self.store.snapshot();
        let Some(task) = snapshot.get(dragged_id) else {
            debug!(dragged_id, "drag start on unknown task ignored");
            self.state = DragState::Idle;
            return false;
        };
        debug!(task_id = %task.id(), "drag started");
        self.state = DragState::Dragging(task.clone());
        true
    }

    /// Ends the drag and applies the drop of `dragged_id` onto `over_id`.
    ///
    /// The session is idle afterwards whatever the outcome.
    pub fn end_drag(&mut self, dragged_id: &str, over_id: Option<&str>) -> DropOutcome {
        self.state = DragState::Idle;

        let Some(target_id) = over_id else {
            debug!(dragged_id, "drag cancelled");
            return DropOutcome::Cancelled;
        };
        let snapshot = self.store.snapshot();
        let Some(dragged) = snapshot.get(dragged_id).cloned() else {
            debug!(dragged_id, "dragged task no longer in store");
            return DropOutcome::Ignored;
        };

        let outcome = match resolve_drop_target(&snapshot, target_id) {
            Some(DropTarget::Lane(lane)) => self.drop_on_lane(&dragged, lane),
            Some(DropTarget::Task(target)) if target.id() != dragged.id() => {
                self.drop_on_task(&dragged, &target)
            }
            Some(DropTarget::Task(_)) | None => None,
        }
        .unwrap_or(DropOutcome::Ignored);
        debug!(
            dragged_id,
            over_id = target_id,
            outcome = outcome_kind(&outcome),
            "drag ended"
        );
        outcome
    }

    fn drop_on_lane(&self, dragged: &Task, lane: &'static Lane) -> Option<DropOutcome> {
        let write = self.store.set_status(dragged.id(), lane.status())?;
        Some(DropOutcome::MovedToLane {
            lane,
            pending: write.into(),
        })
    }

    fn drop_on_task(&self, dragged: &Task, target: &Task) -> Option<DropOutcome> {
        let pending = if dragged.status() == target.status() {
            None
        } else {
            let write = self.store.set_status(dragged.id(), target.status())?;
            Some(PendingStatusChange::from(write))
        };
        let (from, to) = self.store.move_task(dragged.id(), target.id())?;
        Some(DropOutcome::Reordered { from, to, pending })
    }
}

const fn outcome_kind(outcome: &DropOutcome) -> &'static str {
    match outcome {
        DropOutcome::Cancelled => "cancelled",
        DropOutcome::Ignored => "ignored",
        DropOutcome::MovedToLane { .. } => "moved_to_lane",
        DropOutcome::Reordered { .. } => "reordered",
    }
}
