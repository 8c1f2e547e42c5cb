//! Configuration for the interactive board workspace and the catalog.

use crate::board::domain::CancelPolicy;
use chrono::TimeDelta;

/// What the workspace does when persisting a move fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveFailurePolicy {
    /// Reload the authoritative board, discarding the optimistic order.
    #[default]
    Resync,
    /// Keep the optimistic order; the next reload reconciles it.
    KeepOptimistic,
}

/// Interaction settings for [`super::BoardWorkspace`].
///
/// # Examples
///
/// ```
/// use taskboard::board::domain::CancelPolicy;
/// use taskboard::board::services::{MoveFailurePolicy, WorkspaceConfig};
///
/// let config = WorkspaceConfig::default();
/// assert_eq!(config.cancel_policy, CancelPolicy::KeepHoverOrder);
/// assert_eq!(config.move_failure_policy, MoveFailurePolicy::Resync);
///
/// let strict = WorkspaceConfig::strict_resync();
/// assert_eq!(strict.cancel_policy, CancelPolicy::RevertToOrigin);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Order kept when a drag is released over nothing.
    pub cancel_policy: CancelPolicy,
    /// Recovery after a failed move.
    pub move_failure_policy: MoveFailurePolicy,
}

impl WorkspaceConfig {
    /// Reverts cancelled drags and reloads after failed moves, so the view
    /// never shows an order storage has not confirmed.
    #[must_use]
    pub const fn strict_resync() -> Self {
        Self {
            cancel_policy: CancelPolicy::RevertToOrigin,
            move_failure_policy: MoveFailurePolicy::Resync,
        }
    }

    /// Keeps every local change and waits for the next reload.
    #[must_use]
    pub const fn optimistic() -> Self {
        Self {
            cancel_policy: CancelPolicy::KeepHoverOrder,
            move_failure_policy: MoveFailurePolicy::KeepOptimistic,
        }
    }
}

/// Settings for [`super::BoardCatalogService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Column titles created with every new board, in order.
    pub default_columns: Vec<String>,
    /// Boards updated within this window count as recently active.
    pub recent_activity_window: TimeDelta,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_columns: ["To Do", "In Progress", "Review", "Done"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            recent_activity_window: TimeDelta::days(7),
        }
    }
}

impl CatalogConfig {
    /// Creates boards without any columns.
    #[must_use]
    pub fn without_default_columns() -> Self {
        Self {
            default_columns: Vec::new(),
            ..Self::default()
        }
    }
}
