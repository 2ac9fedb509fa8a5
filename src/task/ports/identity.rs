//! Identity port: who is signed in.

use crate::task::domain::OwnerId;

/// Session lookup provided by the identity service.
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in user, or `None` when nobody is signed in.
    fn current_user(&self) -> Option<OwnerId>;
}
