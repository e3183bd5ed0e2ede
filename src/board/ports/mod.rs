//! Port contracts for the board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod gateway;

#[cfg(test)]
pub use gateway::MockTaskGateway;
pub use gateway::{TaskGateway, TaskGatewayError, TaskGatewayResult};
