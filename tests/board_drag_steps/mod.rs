//! Step definitions for board drag-and-drop behaviour tests.

mod given;
mod then;
mod when;
pub mod world;
