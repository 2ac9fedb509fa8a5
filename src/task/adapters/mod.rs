//! Adapter implementations for task collection ports.

pub mod memory;
pub mod postgres;
