//! Taskboard: project task management with a drag-and-drop kanban board.
//!
//! This crate provides the client-side core of the board: the task store
//! the board renders from, the drag session that turns drops into status
//! changes and reorderings, and the reconciliation of optimistic changes
//! with the task API.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory)
//!
//! # Modules
//!
//! - [`board`]: Task store, drag session and reconciliation
//! - [`config`]: Runtime configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod telemetry;
