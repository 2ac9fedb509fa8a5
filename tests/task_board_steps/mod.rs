//! Step definitions for task board behaviour scenarios.

pub mod when;
pub mod world;
