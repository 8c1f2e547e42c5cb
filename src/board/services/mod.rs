//! Application services for boards: catalogue, synchronisation, move
//! reconciliation and the interactive workspace.

mod catalog;
mod config;
mod reconcile;
mod sync;
mod workspace;

pub use catalog::{BoardCatalogService, BoardStats};
pub use config::{CatalogConfig, MoveFailurePolicy, WorkspaceConfig};
pub use reconcile::{MoveCommitOutcome, MoveReconciler};
pub use sync::{BoardSnapshot, BoardSyncError, BoardSyncResult, BoardSyncService, MutationKind};
pub use workspace::{BoardWorkspace, DropReport, FinishedDrag, WorkspaceStatus};
