//! Taskboard: ordered Kanban boards with drag-and-drop reordering.
//!
//! This crate provides the engine behind a Kanban board UI: an ordered
//! column and task model, task filtering, a drag session that reorders
//! tasks while hovering, drop reconciliation that issues exactly one
//! persisted move per drop, and a synchronisation layer over pluggable
//! storage.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure ordering and filtering logic with no I/O
//! - **Ports**: Abstract trait interfaces for storage and identity
//! - **Adapters**: Concrete implementations of ports
//! - **Services**: Orchestration of domain and ports
//!
//! # Modules
//!
//! - [`board`]: Boards, columns, tasks, drag-and-drop and synchronisation

pub mod board;
