//! Kanban board for a single project.
//!
//! Cards are dragged between four fixed lanes. A drop is applied to the
//! local task store at once and the resulting status change is then
//! persisted through the task API, whose answer replaces the optimistic
//! copy. Reordering within the board is local only and resets on the next
//! fetch. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Store, drag session and reconciliation in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
