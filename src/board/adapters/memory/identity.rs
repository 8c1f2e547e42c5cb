//! Fixed identity provider for tests and single-user tooling.

use std::sync::{Arc, PoisonError, RwLock};

use crate::board::{
    domain::UserId,
    ports::{IdentityError, IdentityProvider, IdentityResult},
};

/// Identity provider returning a configurable user.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    user: Arc<RwLock<Option<UserId>>>,
}

impl StaticIdentityProvider {
    /// Creates a provider signed in as `user`.
    #[must_use]
    pub fn signed_in(user: UserId) -> Self {
        Self {
            user: Arc::new(RwLock::new(Some(user))),
        }
    }

    /// Creates a provider with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Switches the signed-in user; `None` signs out.
    ///
    /// A lock poisoned by a panicking writer is recovered, so the switch
    /// always takes effect.
    pub fn set_user(&self, user: Option<UserId>) {
        let mut guard = self.user.write().unwrap_or_else(PoisonError::into_inner);
        *guard = user;
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_user(&self) -> IdentityResult<UserId> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(IdentityError::Unauthenticated)
    }
}
