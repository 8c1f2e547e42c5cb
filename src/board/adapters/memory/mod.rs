//! In-memory adapters for the board ports.
//!
//! These back the services in tests and local tooling. The repository keeps
//! positions contiguous per column and breaks position ties by the order in
//! which tasks were stored or last moved.

mod identity;
mod repository;

pub use identity::StaticIdentityProvider;
pub use repository::InMemoryBoardRepository;
