//! Request lifecycle bookkeeping for task mutations.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// The user action a mutation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Create a task from a draft.
    Create,
    /// Edit fields of an existing task.
    Update,
    /// Flip a task between completed and todo.
    ToggleComplete,
    /// Delete a task.
    Delete,
}

impl MutationKind {
    /// Returns a stable lowercase name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::ToggleComplete => "toggle_complete",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of one mutation request in its lifecycle.
///
/// `Idle -> Pending -> {Committed | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationState {
    /// Not yet submitted.
    Idle,
    /// Submitted; awaiting the collaborator's response.
    Pending,
    /// Confirmed by the collaborator and applied locally.
    Committed,
    /// Rejected or not applicable; local state is unchanged.
    Failed,
}

impl MutationState {
    /// Returns `true` for `Committed` and `Failed`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Failed)
    }

    /// Returns `true` when moving to `next` follows the lifecycle.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Pending) | (Self::Pending, Self::Committed | Self::Failed)
        )
    }
}

/// One mutation request and where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    kind: MutationKind,
    state: MutationState,
}

impl Mutation {
    /// Creates an idle request.
    #[must_use]
    pub const fn new(kind: MutationKind) -> Self {
        Self {
            kind,
            state: MutationState::Idle,
        }
    }

    /// Returns the action performed.
    #[must_use]
    pub const fn kind(self) -> MutationKind {
        self.kind
    }

    /// Returns the lifecycle position.
    #[must_use]
    pub const fn state(self) -> MutationState {
        self.state
    }

    /// Marks an idle request as submitted. Other states are kept.
    #[must_use]
    pub const fn submitted(self) -> Self {
        self.moved_to(MutationState::Pending)
    }

    /// Resolves a pending request. Other states are kept.
    #[must_use]
    pub const fn resolved(self, confirmed: bool) -> Self {
        if confirmed {
            self.moved_to(MutationState::Committed)
        } else {
            self.moved_to(MutationState::Failed)
        }
    }

    const fn moved_to(self, next: MutationState) -> Self {
        if self.state.can_transition_to(next) {
            Self {
                kind: self.kind,
                state: next,
            }
        } else {
            self
        }
    }
}

/// Counts requests in flight and remembers the latest resolved one.
#[derive(Debug, Default)]
pub(crate) struct MutationTracker {
    in_flight: AtomicUsize,
    last_resolved: Mutex<Option<Mutation>>,
}

impl MutationTracker {
    /// Submits a request and returns the guard that resolves it.
    pub(crate) fn begin(&self, kind: MutationKind) -> PendingMutation<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        PendingMutation {
            tracker: self,
            mutation: Mutation::new(kind).submitted(),
        }
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn last_resolved(&self) -> Option<Mutation> {
        *self
            .last_resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// A submitted request. Dropping it without resolving still releases the
/// in-flight slot.
pub(crate) struct PendingMutation<'a> {
    tracker: &'a MutationTracker,
    mutation: Mutation,
}

impl PendingMutation<'_> {
    pub(crate) const fn kind(&self) -> MutationKind {
        self.mutation.kind()
    }

    /// Resolves the request and records it as the latest.
    pub(crate) fn resolve(self, confirmed: bool) -> Mutation {
        let resolved = self.mutation.resolved(confirmed);
        *self
            .tracker
            .last_resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(resolved);
        resolved
    }
}

impl Drop for PendingMutation<'_> {
    fn drop(&mut self) {
        self.tracker.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
