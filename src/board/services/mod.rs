//! Application services for the board: the task store, the drag session,
//! reconciliation with the task API, and the per-project session tying them
//! together.

mod drag;
mod reconcile;
mod session;
mod store;
mod view;

pub use drag::{
    DragSessionController, DragState, DropOutcome, DropTarget, PendingStatusChange,
    resolve_drop_target,
};
pub use reconcile::{ReconcileError, ReconcileOutcome, ReconcileResult, ReconciliationClient};
pub use session::{BoardError, BoardResult, BoardSession};
pub use store::{StatusWrite, TaskSnapshot, TaskStore, WeakTaskStore};
pub use view::{BoardView, LaneView};
