//! Port contracts for the task collection view model.
//!
//! Ports define infrastructure-agnostic interfaces to the two external
//! collaborators: the persistence backend and the identity service.

pub mod identity;
pub mod persistence;

pub use identity::IdentityProvider;
pub use persistence::{PersistenceResult, RemoteError, TaskPersistence};
