//! Taskdeck: a per-user task list with confirmed-write mutations.
//!
//! The crate keeps one signed-in user's tasks in memory, filters them for
//! display, and changes them only after the hosted backend confirms each
//! request.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: task records, validation, filtering, and the ordered
//!   collection, with no infrastructure dependencies
//! - **Ports**: the persistence and identity traits the board depends on
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//! - **Services**: the task board and its mutation coordinator
//!
//! # Modules
//!
//! - [`task`]: task board, collection store, and persistence adapters

pub mod task;
