//! Persists the move decided by drop reconciliation.

use super::sync::{BoardSyncError, BoardSyncService};
use crate::board::{
    domain::MovePlan,
    ports::{BoardRepository, IdentityProvider},
};
use mockable::Clock;
use std::sync::Arc;

/// Result of persisting one move.
#[derive(Debug, Clone)]
pub enum MoveCommitOutcome {
    /// Storage accepted the move.
    Committed(MovePlan),
    /// Storage rejected the move after the optimistic order was applied.
    /// The local order may differ from storage until the next reload.
    Drifted {
        /// The move that was not persisted.
        plan: MovePlan,
        /// Why it failed.
        error: BoardSyncError,
    },
}

impl MoveCommitOutcome {
    /// Returns the move this outcome refers to.
    #[must_use]
    pub const fn plan(&self) -> &MovePlan {
        match self {
            Self::Committed(plan) | Self::Drifted { plan, .. } => plan,
        }
    }

    /// Returns `true` when storage accepted the move.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Issues exactly one persistence call per reconciled drop.
///
/// Failures are logged and reported, never retried. Completions may arrive
/// out of order when several drops are in flight; storage keeps whichever
/// write lands last.
pub struct MoveReconciler<R, I, C>
where
    R: BoardRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    sync: Arc<BoardSyncService<R, I, C>>,
}

impl<R, I, C> Clone for MoveReconciler<R, I, C>
where
    R: BoardRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            sync: Arc::clone(&self.sync),
        }
    }
}

impl<R, I, C> MoveReconciler<R, I, C>
where
    R: BoardRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a reconciler persisting through `sync`.
    #[must_use]
    pub const fn new(sync: Arc<BoardSyncService<R, I, C>>) -> Self {
        Self { sync }
    }

    /// Persists `plan` with a single `move_task` call.
    pub async fn commit(&self, plan: MovePlan) -> MoveCommitOutcome {
        match self
            .sync
            .move_task(plan.task_id, plan.to_column_id, plan.to_index)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    task_id = %plan.task_id,
                    from_column = %plan.from_column_id,
                    to_column = %plan.to_column_id,
                    to_index = plan.to_index,
                    "move persisted"
                );
                MoveCommitOutcome::Committed(plan)
            }
            Err(error) => {
                tracing::warn!(
                    task_id = %plan.task_id,
                    to_column = %plan.to_column_id,
                    to_index = plan.to_index,
                    %error,
                    "move not persisted; local order may drift until the next reload"
                );
                MoveCommitOutcome::Drifted { plan, error }
            }
        }
    }
}
