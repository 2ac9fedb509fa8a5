//! Shared fixtures for in-memory board tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::task::{
    adapters::memory::{InMemoryTaskPersistence, StaticIdentity},
    domain::OwnerId,
    services::{TaskBoard, TaskBoardResult},
};

/// Board type exercised by the integration tests.
pub type TestBoard = TaskBoard<InMemoryTaskPersistence, DefaultClock>;

/// A backend shared by every board opened in one test.
pub struct Backend {
    pub persistence: Arc<InMemoryTaskPersistence>,
}

impl Backend {
    /// Opens a board for `owner` against this backend.
    pub fn open(&self, owner: OwnerId) -> TaskBoardResult<TestBoard> {
        TaskBoard::activate(
            Arc::clone(&self.persistence),
            &StaticIdentity::signed_in(owner),
            Arc::new(DefaultClock),
        )
    }
}

#[fixture]
pub fn backend() -> Backend {
    Backend {
        persistence: Arc::new(InMemoryTaskPersistence::new()),
    }
}
