//! Fixed identity provider.

use crate::task::{domain::OwnerId, ports::IdentityProvider};

/// Identity provider that always reports the same session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticIdentity {
    user: Option<OwnerId>,
}

impl StaticIdentity {
    /// Creates a provider with `owner` signed in.
    #[must_use]
    pub const fn signed_in(owner: OwnerId) -> Self {
        Self { user: Some(owner) }
    }

    /// Creates a provider with nobody signed in.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self { user: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<OwnerId> {
        self.user
    }
}
