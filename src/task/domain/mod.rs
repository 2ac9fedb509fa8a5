//! Domain model for the task collection view model.
//!
//! Task records, their validated scalars, the search/filter predicate, and
//! the in-memory collection live here. Nothing in this module performs I/O;
//! the boundary to the persistence collaborator is the raw [`TaskRow`]
//! shape, which is validated into a [`TaskRecord`] on the way in.

pub mod collection;
pub mod filter;
pub mod stats;

mod classification;
mod draft;
mod error;
mod ids;
mod row;
mod scalars;
mod task;

pub use classification::{TaskPriority, TaskStatus};
pub use collection::{CollectionError, TaskCollection};
pub use draft::{TaskDraft, TaskPatch, ValidatedPatch};
pub use error::{DataShapeError, ParsePriorityError, ParseStatusError, TaskValidationError};
pub use filter::{ALL_FILTER, PriorityFilter, StatusFilter, TaskFilter, matches};
pub use ids::{OwnerId, ProjectId, TaskId};
pub use row::{NewTaskRow, TaskRow, TaskRowPatch, decode_rows};
pub use scalars::{ActualHours, Difficulty, EstimatedHours, TaskTitle, parse_tags};
pub use stats::TaskStats;
pub use task::{StatusChange, TaskRecord, TaskRecordData};
