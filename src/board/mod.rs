//! Kanban boards with drag-and-drop task ordering.
//!
//! A board holds ordered columns and each column holds ordered tasks. The
//! module keeps a local ordered model that drag interactions reorder
//! immediately, decides on drop which single move needs persisting, and
//! synchronises that move with storage. It follows hexagonal architecture:
//!
//! - Domain types, the ordered model, filtering and the drag state machine
//!   in [`domain`]
//! - Port contracts for storage and identity in [`ports`]
//! - In-memory adapter implementations in [`adapters`]
//! - Synchronisation, catalogue and workspace services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
