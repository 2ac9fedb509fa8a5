//! Task collection view model.
//!
//! Holds one user's tasks in memory, filters them for display, and
//! coordinates create, update, toggle-complete, and delete requests with a
//! hosted persistence backend so that local state only ever reflects
//! confirmed writes. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
