//! Domain model for the kanban board.
//!
//! Tasks, their status and priority enumerations, the fixed lane registry
//! and the analytics tally. Nothing here performs I/O.

mod analytics;
mod error;
mod ids;
mod lane;
mod task;

pub use analytics::{PriorityBreakdown, TaskAnalytics};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError};
pub use ids::{ProjectId, TaskId};
pub use lane::{LANES, Lane, StatusRegistry};
pub use task::{NewTask, Task, TaskData, TaskPriority, TaskStatus};
