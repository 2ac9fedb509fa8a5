//! The in-memory task list backing a task board.

use super::{DataShapeError, TaskFilter, TaskId, TaskRecord, TaskRow, TaskStats};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors signalled by [`TaskCollection`] operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// No record with the identifier is held.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A row could not be converted into a task record.
    #[error(transparent)]
    DataShape(#[from] DataShapeError),
}

/// Authoritative in-memory list of task records, newest first.
///
/// Records are ordered by `created_at` descending; records sharing a
/// creation timestamp keep the order in which they arrived. Identifiers are
/// unique within the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskCollection {
    records: Vec<TaskRecord>,
}

impl TaskCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list with freshly fetched rows.
    ///
    /// Every row is converted before anything changes, so a malformed row
    /// leaves the collection as it was. Rows repeating an identifier collapse
    /// into the last occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DataShape`] for the first malformed row.
    pub fn replace_all(
        &mut self,
        rows: impl IntoIterator<Item = TaskRow>,
    ) -> Result<(), CollectionError> {
        let converted = rows
            .into_iter()
            .map(TaskRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.replace_all_records(converted);
        Ok(())
    }

    /// Replaces the whole list with already validated records.
    pub fn replace_all_records(&mut self, records: impl IntoIterator<Item = TaskRecord>) {
        let mut next = Self::new();
        for record in records {
            next.upsert_unsorted(record);
        }
        next.records
            .sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        *self = next;
    }

    /// Adds a record ahead of every older record.
    ///
    /// A record whose identifier is already held replaces the existing entry
    /// in place instead of being duplicated.
    pub fn insert(&mut self, record: TaskRecord) {
        if let Some(slot) = self.slot_mut(record.id()) {
            *slot = record;
            return;
        }
        let created_at = record.created_at();
        let position = self
            .records
            .iter()
            .position(|existing| existing.created_at() < created_at)
            .unwrap_or(self.records.len());
        self.records.insert(position, record);
    }

    /// Substitutes the record with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when no record has the
    /// identifier.
    pub fn replace_one(&mut self, id: &TaskId, record: TaskRecord) -> Result<(), CollectionError> {
        let slot = self
            .slot_mut(id)
            .ok_or_else(|| CollectionError::NotFound(id.clone()))?;
        *slot = record;
        Ok(())
    }

    /// Deletes and returns the record with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when no record has the
    /// identifier.
    pub fn remove(&mut self, id: &TaskId) -> Result<TaskRecord, CollectionError> {
        let position = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| CollectionError::NotFound(id.clone()))?;
        Ok(self.records.remove(position))
    }

    /// Returns the record with the given identifier.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&TaskRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Returns `true` when a record has the given identifier.
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over records in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, TaskRecord> {
        self.records.iter()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records passing `filter`, in display order.
    #[must_use]
    pub fn filtered(&self, filter: &TaskFilter) -> Vec<&TaskRecord> {
        self.records
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    /// Tallies the whole collection as of `now`.
    #[must_use]
    pub fn stats(&self, now: DateTime<Utc>) -> TaskStats {
        TaskStats::tally(&self.records, now)
    }

    fn slot_mut(&mut self, id: &TaskId) -> Option<&mut TaskRecord> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    fn upsert_unsorted(&mut self, record: TaskRecord) {
        if let Some(slot) = self.slot_mut(record.id()) {
            *slot = record;
        } else {
            self.records.push(record);
        }
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a TaskRecord;
    type IntoIter = std::slice::Iter<'a, TaskRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
