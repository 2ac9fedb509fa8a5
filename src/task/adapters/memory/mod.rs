//! In-memory adapters for tests and local development.

mod identity;
mod persistence;

pub use identity::StaticIdentity;
pub use persistence::InMemoryTaskPersistence;
