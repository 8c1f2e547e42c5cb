//! Port contracts for the board context.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod identity;
pub mod repository;

pub use identity::{IdentityError, IdentityProvider, IdentityResult};
pub use repository::{BoardRepository, BoardRepositoryError, BoardRepositoryResult};

#[cfg(test)]
pub use identity::MockIdentityProvider;
#[cfg(test)]
pub use repository::MockBoardRepository;
