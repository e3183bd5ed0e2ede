//! Adapter implementations of the board ports.

pub mod http;
pub mod memory;
