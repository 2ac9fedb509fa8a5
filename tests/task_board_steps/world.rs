//! Shared world state for task board BDD scenarios.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use taskdeck::task::{
    adapters::memory::{InMemoryTaskPersistence, StaticIdentity},
    domain::{OwnerId, TaskId, TaskRecord},
    services::{TaskBoard, TaskBoardResult},
};

/// Clock that stays put unless a step moves it.
pub struct ScenarioClock {
    now: Mutex<DateTime<Utc>>,
}

impl ScenarioClock {
    /// Creates a clock frozen at `now`.
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }
}

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Persistence backend used by the BDD world.
pub type ScenarioPersistence = InMemoryTaskPersistence<ScenarioClock>;

/// Board type used by the BDD world.
pub type ScenarioBoard = TaskBoard<ScenarioPersistence, ScenarioClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub persistence: Arc<ScenarioPersistence>,
    pub clock: Arc<ScenarioClock>,
    pub owner: OwnerId,
    pub board: Option<ScenarioBoard>,
    pub calls_before_action: usize,
    pub last_result: Option<TaskBoardResult<TaskRecord>>,
}

impl TaskBoardWorld {
    /// Creates a world with a backend and no board yet.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 9, 1, 9, 0, 0)
            .single()
            .unwrap_or_default();
        let clock = Arc::new(ScenarioClock::at(start));
        Self {
            persistence: Arc::new(InMemoryTaskPersistence::with_clock(Arc::clone(&clock))),
            clock,
            owner: OwnerId::new(),
            board: None,
            calls_before_action: 0,
            last_result: None,
        }
    }

    /// Opens the board for the world's owner.
    pub fn activate(&mut self) -> Result<(), eyre::Report> {
        let board = TaskBoard::activate(
            Arc::clone(&self.persistence),
            &StaticIdentity::signed_in(self.owner),
            Arc::clone(&self.clock),
        )?;
        self.board = Some(board);
        Ok(())
    }

    /// Returns the open board.
    pub fn board(&self) -> Result<&ScenarioBoard, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no task board open in scenario world"))
    }

    /// Finds the identifier of the task with `title`.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.board()?
            .tasks()
            .into_iter()
            .find(|task| task.title().as_str() == title)
            .map(|task| task.id().clone())
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} on the board"))
    }

    /// Returns the task with `title`.
    pub fn task(&self, title: &str) -> Result<TaskRecord, eyre::Report> {
        let id = self.task_id(title)?;
        self.board()?
            .task(&id)
            .ok_or_else(|| eyre::eyre!("task {id} vanished from the board"))
    }

    /// Remembers the backend call count ahead of the step under test.
    pub fn mark_calls(&mut self) {
        self.calls_before_action = self.persistence.call_count();
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
