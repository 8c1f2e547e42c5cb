//! Board synchronisation layer: loads the authoritative board graph and
//! forwards every mutation to storage.
//!
//! Storage failures are caught here and turned into [`BoardSyncError`]
//! values; nothing from the repository reaches callers untyped.

use crate::board::{
    domain::{
        Board, BoardDomainError, BoardId, BoardUpdate, Column, ColumnId, ColumnWithTasks, Task,
        TaskDraft, TaskId, validate_membership,
    },
    ports::{BoardRepository, BoardRepositoryError, IdentityError, IdentityProvider},
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The kind of mutation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Creating a board.
    CreateBoard,
    /// Changing a board's title or colour.
    UpdateBoard,
    /// Creating a column.
    CreateColumn,
    /// Renaming a column.
    RenameColumn,
    /// Creating a task.
    CreateTask,
}

impl MutationKind {
    /// Returns a short label for messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateBoard => "create board",
            Self::UpdateBoard => "update board",
            Self::CreateColumn => "create column",
            Self::RenameColumn => "rename column",
            Self::CreateTask => "create task",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the synchronisation layer.
#[derive(Debug, Clone, Error)]
pub enum BoardSyncError {
    /// Fetching the board, its columns or its tasks failed.
    #[error("failed to load board {board_id}: {source}")]
    LoadFailure {
        /// Board being loaded.
        board_id: BoardId,
        /// Underlying storage error.
        source: BoardRepositoryError,
    },

    /// Storage returned a board graph that cannot be ordered, such as a
    /// repeated column or a task filed under the wrong column.
    #[error("board {board_id} is inconsistent: {source}")]
    InconsistentBoard {
        /// Board being loaded.
        board_id: BoardId,
        /// Validation error raised by the ordered model.
        source: BoardDomainError,
    },

    /// Fetching the user's board list failed.
    #[error("failed to load boards: {0}")]
    ListFailure(#[source] BoardRepositoryError),

    /// A create or update call failed.
    #[error("failed to {operation}: {source}")]
    MutationFailure {
        /// Mutation that failed.
        operation: MutationKind,
        /// Underlying storage error.
        source: BoardRepositoryError,
    },

    /// Persisting a drag-and-drop move failed.
    #[error("failed to persist move of task {task_id}: {source}")]
    MoveFailure {
        /// Task that was moved.
        task_id: TaskId,
        /// Underlying storage error.
        source: BoardRepositoryError,
    },

    /// No user is signed in.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Input or model validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// A board-scoped operation was requested before any board was opened.
    #[error("no board is open")]
    NoBoardOpen,

    /// A task was created without naming a column on a board with none.
    #[error("no column available to add the task to")]
    NoColumnAvailable,
}

impl BoardSyncError {
    /// Returns `true` for failures that leave nothing to show, which the UI
    /// reports as a full-screen error state.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(
            self,
            Self::LoadFailure { .. }
                | Self::InconsistentBoard { .. }
                | Self::ListFailure(_)
                | Self::Identity(_)
        )
    }

    const fn mutation(operation: MutationKind, source: BoardRepositoryError) -> Self {
        Self::MutationFailure { operation, source }
    }
}

/// Result type for synchronisation operations.
pub type BoardSyncResult<T> = Result<T, BoardSyncError>;

/// A board with its columns and tasks, as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Board metadata.
    pub board: Board,
    /// Columns in position order, each with tasks in position order.
    pub columns: Vec<ColumnWithTasks>,
}

/// Board synchronisation service.
#[derive(Clone)]
pub struct BoardSyncService<R, I, C>
where
    R: BoardRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    identity: Arc<I>,
    clock: Arc<C>,
}

impl<R, I, C> BoardSyncService<R, I, C>
where
    R: BoardRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a new synchronisation service.
    #[must_use]
    pub const fn new(repository: Arc<R>, identity: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            repository,
            identity,
            clock,
        }
    }

    /// Returns the repository port.
    #[must_use]
    pub const fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Returns the identity port.
    #[must_use]
    pub const fn identity(&self) -> &Arc<I> {
        &self.identity
    }

    /// Returns the clock used for timestamps.
    #[must_use]
    pub const fn clock(&self) -> &Arc<C> {
        &self.clock
    }

    /// Loads a board owned by the current user with all columns and tasks.
    ///
    /// Safe to call repeatedly to force a resynchronisation. A board owned
    /// by someone else is reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Identity`] when nobody is signed in,
    /// [`BoardSyncError::LoadFailure`] when any fetch fails, or
    /// [`BoardSyncError::InconsistentBoard`] when the fetched columns and
    /// tasks do not form a valid board.
    pub async fn load(&self, board_id: BoardId) -> BoardSyncResult<BoardSnapshot> {
        let user = self.identity.current_user()?;
        let load_failure = |source| BoardSyncError::LoadFailure { board_id, source };

        let board = self
            .repository
            .find_board(board_id)
            .await
            .map_err(load_failure)?
            .filter(|board| board.is_owned_by(&user))
            .ok_or_else(|| load_failure(BoardRepositoryError::BoardNotFound(board_id)))?;
        let columns = self
            .repository
            .columns_with_tasks(board_id)
            .await
            .map_err(load_failure)?;
        validate_membership(&columns)
            .map_err(|source| BoardSyncError::InconsistentBoard { board_id, source })?;

        tracing::info!(%board_id, columns = columns.len(), "board loaded");
        Ok(BoardSnapshot { board, columns })
    }

    /// Applies a title and colour update to a board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Domain`] for blank values or
    /// [`BoardSyncError::MutationFailure`] when storage rejects the change.
    pub async fn update_board_meta(
        &self,
        board_id: BoardId,
        update: &BoardUpdate,
    ) -> BoardSyncResult<Board> {
        let mut board = self.owned_board(board_id, MutationKind::UpdateBoard).await?;
        board.apply_update(update, &*self.clock)?;
        self.repository
            .update_board(&board)
            .await
            .map_err(|source| BoardSyncError::mutation(MutationKind::UpdateBoard, source))?;
        tracing::debug!(%board_id, "board metadata updated");
        Ok(board)
    }

    /// Creates a column after the board's current last column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Domain`] for a blank title or
    /// [`BoardSyncError::MutationFailure`] when storage rejects the change.
    pub async fn create_column(&self, board_id: BoardId, title: &str) -> BoardSyncResult<Column> {
        let operation = MutationKind::CreateColumn;
        self.owned_board(board_id, operation).await?;
        let existing = self
            .repository
            .columns_with_tasks(board_id)
            .await
            .map_err(|source| BoardSyncError::mutation(operation, source))?;
        let position = next_position(existing.iter().map(|entry| entry.column().position()));
        let column = Column::new(board_id, title, position, &*self.clock)?;
        self.repository
            .store_column(&column)
            .await
            .map_err(|source| BoardSyncError::mutation(operation, source))?;
        tracing::debug!(%board_id, column_id = %column.id(), position, "column created");
        Ok(column)
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Domain`] for a blank title or
    /// [`BoardSyncError::MutationFailure`] when the column is missing or
    /// storage rejects the change.
    pub async fn update_column_title(
        &self,
        column_id: ColumnId,
        title: &str,
    ) -> BoardSyncResult<Column> {
        let operation = MutationKind::RenameColumn;
        let mut column = self.owned_column(column_id, operation).await?;
        column.rename(title)?;
        self.repository
            .update_column(&column)
            .await
            .map_err(|source| BoardSyncError::mutation(operation, source))?;
        Ok(column)
    }

    /// Creates a task at the end of a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::MutationFailure`] when the column is
    /// missing or storage rejects the change.
    pub async fn create_task(&self, column_id: ColumnId, draft: TaskDraft) -> BoardSyncResult<Task> {
        let operation = MutationKind::CreateTask;
        let column = self.owned_column(column_id, operation).await?;
        let siblings = self
            .repository
            .columns_with_tasks(column.board_id())
            .await
            .map_err(|source| BoardSyncError::mutation(operation, source))?;
        let position = next_position(
            siblings
                .iter()
                .filter(|entry| entry.id() == column_id)
                .flat_map(|entry| entry.tasks().iter().map(Task::position)),
        );
        let task = Task::new(column_id, draft, position, &*self.clock);
        self.repository
            .store_task(&task)
            .await
            .map_err(|source| BoardSyncError::mutation(operation, source))?;
        tracing::debug!(%column_id, task_id = %task.id(), position, "task created");
        Ok(task)
    }

    /// Persists a drag-and-drop move.
    ///
    /// Used only by the move reconciler. The destination column must belong
    /// to a board owned by the current user and the task must already live
    /// on that board. The repository recomputes the backing positions.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Identity`] when nobody is signed in, or
    /// [`BoardSyncError::MoveFailure`] when the destination is not the
    /// user's, the task is on another board, or storage rejects the move.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        column_id: ColumnId,
        index: usize,
    ) -> BoardSyncResult<()> {
        let move_failure =
            |source: BoardRepositoryError| BoardSyncError::MoveFailure { task_id, source };
        let destination = self.scoped_column(column_id, move_failure).await?;
        let board_id = destination.board_id();
        let on_board = self
            .repository
            .columns_with_tasks(board_id)
            .await
            .map_err(move_failure)?
            .iter()
            .any(|entry| entry.tasks().iter().any(|task| task.id() == task_id));
        if !on_board {
            tracing::warn!(%task_id, %board_id, "move rejected: task is not on the board");
            return Err(move_failure(BoardRepositoryError::TaskNotFound(task_id)));
        }

        tracing::debug!(%task_id, %column_id, index, "persisting move");
        self.repository
            .move_task(task_id, column_id, index)
            .await
            .map_err(move_failure)
    }

    async fn owned_board(
        &self,
        board_id: BoardId,
        operation: MutationKind,
    ) -> BoardSyncResult<Board> {
        self.scoped_board(board_id, |source| BoardSyncError::mutation(operation, source))
            .await
    }

    async fn owned_column(
        &self,
        column_id: ColumnId,
        operation: MutationKind,
    ) -> BoardSyncResult<Column> {
        self.scoped_column(column_id, |source| BoardSyncError::mutation(operation, source))
            .await
    }

    /// Finds a board owned by the current user; others are reported as
    /// not found.
    async fn scoped_board<F>(&self, board_id: BoardId, fail: F) -> BoardSyncResult<Board>
    where
        F: Fn(BoardRepositoryError) -> BoardSyncError + Copy,
    {
        let user = self.identity.current_user()?;
        self.repository
            .find_board(board_id)
            .await
            .map_err(fail)?
            .filter(|board| board.is_owned_by(&user))
            .ok_or_else(|| fail(BoardRepositoryError::BoardNotFound(board_id)))
    }

    async fn scoped_column<F>(&self, column_id: ColumnId, fail: F) -> BoardSyncResult<Column>
    where
        F: Fn(BoardRepositoryError) -> BoardSyncError + Copy,
    {
        let column = self
            .repository
            .find_column(column_id)
            .await
            .map_err(fail)?
            .ok_or_else(|| fail(BoardRepositoryError::ColumnNotFound(column_id)))?;
        self.scoped_board(column.board_id(), fail).await?;
        Ok(column)
    }
}

/// Position after the current maximum, or zero for an empty sequence.
fn next_position(positions: impl Iterator<Item = i64>) -> i64 {
    positions.max().map_or(0, |max| max.saturating_add(1))
}
