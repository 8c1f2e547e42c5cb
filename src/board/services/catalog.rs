//! Board catalogue: listing, searching and creating the signed-in user's
//! boards.

use super::{
    config::CatalogConfig,
    sync::{BoardSnapshot, BoardSyncError, BoardSyncResult, MutationKind},
};
use crate::board::{
    domain::{Board, BoardListFilter, Column, ColumnWithTasks, position_for},
    ports::{BoardRepository, IdentityProvider},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Summary figures for the board dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    /// Number of boards the user owns.
    pub total_boards: usize,
    /// Boards updated within the configured activity window.
    pub recently_active: usize,
}

/// Service over the current user's collection of boards.
#[derive(Clone)]
pub struct BoardCatalogService<R, I, C>
where
    R: BoardRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    identity: Arc<I>,
    clock: Arc<C>,
    config: CatalogConfig,
}

impl<R, I, C> BoardCatalogService<R, I, C>
where
    R: BoardRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a catalogue service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, identity: Arc<I>, clock: Arc<C>) -> Self {
        Self::with_config(repository, identity, clock, CatalogConfig::default())
    }

    /// Creates a catalogue service with a custom configuration.
    #[must_use]
    pub const fn with_config(
        repository: Arc<R>,
        identity: Arc<I>,
        clock: Arc<C>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            repository,
            identity,
            clock,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Lists the current user's boards, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Identity`] when nobody is signed in or
    /// [`BoardSyncError::ListFailure`] when storage fails.
    pub async fn list_boards(&self) -> BoardSyncResult<Vec<Board>> {
        let user = self.identity.current_user()?;
        let boards = self
            .repository
            .list_boards(&user)
            .await
            .map_err(BoardSyncError::ListFailure)?;
        tracing::debug!(user = user.as_str(), count = boards.len(), "boards listed");
        Ok(boards)
    }

    /// Lists the current user's boards that pass `filter`, keeping the
    /// listing order.
    ///
    /// # Errors
    ///
    /// As [`Self::list_boards`].
    pub async fn list_filtered(&self, filter: &BoardListFilter) -> BoardSyncResult<Vec<Board>> {
        let boards = self.list_boards().await?;
        Ok(filter.apply(&boards).into_iter().cloned().collect())
    }

    /// Creates a board for the current user together with the configured
    /// default columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Domain`] for a blank title or colour, or
    /// [`BoardSyncError::MutationFailure`] when storage rejects the board
    /// or one of its columns.
    pub async fn create_board(&self, title: &str, color: &str) -> BoardSyncResult<BoardSnapshot> {
        let operation = MutationKind::CreateBoard;
        let owner = self.identity.current_user()?;
        let board = Board::new(owner, title, color, &*self.clock)?;
        self.repository
            .store_board(&board)
            .await
            .map_err(|source| BoardSyncError::MutationFailure { operation, source })?;

        let mut columns = Vec::with_capacity(self.config.default_columns.len());
        for (index, column_title) in self.config.default_columns.iter().enumerate() {
            let column = Column::new(board.id(), column_title, position_for(index), &*self.clock)?;
            self.repository
                .store_column(&column)
                .await
                .map_err(|source| BoardSyncError::MutationFailure {
                    operation: MutationKind::CreateColumn,
                    source,
                })?;
            columns.push(ColumnWithTasks::empty(column));
        }

        tracing::info!(board_id = %board.id(), columns = columns.len(), "board created");
        Ok(BoardSnapshot { board, columns })
    }

    /// Computes dashboard figures relative to `now`.
    ///
    /// # Errors
    ///
    /// As [`Self::list_boards`].
    pub async fn dashboard_stats(&self, now: DateTime<Utc>) -> BoardSyncResult<BoardStats> {
        let boards = self.list_boards().await?;
        let window = self.config.recent_activity_window;
        let recently_active = boards
            .iter()
            .filter(|board| now.signed_duration_since(board.updated_at()) <= window)
            .count();
        Ok(BoardStats {
            total_boards: boards.len(),
            recently_active,
        })
    }
}
