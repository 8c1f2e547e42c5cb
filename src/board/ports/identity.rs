//! Identity port: who is using the board.

use crate::board::domain::UserId;
use thiserror::Error;

/// Result type for identity lookups.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Supplies the current user's stable identifier.
///
/// The board context knows nothing about the authentication protocol; it
/// only needs an opaque id to scope board queries.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthenticated`] when nobody is signed in.
    fn current_user(&self) -> IdentityResult<UserId>;
}

/// Errors returned by identity providers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// No user is signed in.
    #[error("no authenticated user")]
    Unauthenticated,
}
