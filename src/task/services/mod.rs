//! Application services for the task collection view model.

mod board;
mod coordinator;
mod error;
mod mutation;
mod shared;

pub use board::TaskBoard;
pub use coordinator::MutationCoordinator;
pub use error::{TaskBoardError, TaskBoardResult};
pub use mutation::{Mutation, MutationKind, MutationState};
pub use shared::SharedTaskCollection;
