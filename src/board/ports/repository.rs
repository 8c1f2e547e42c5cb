//! Repository port for board, column and task persistence.

use crate::board::domain::{Board, BoardId, Column, ColumnId, ColumnWithTasks, Task, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
///
/// Implementations own the backing position scheme. Callers only rely on
/// positions comparing consistently within a column.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Returns every board owned by `owner`, most recently created first.
    async fn list_boards(&self, owner: &UserId) -> BoardRepositoryResult<Vec<Board>>;

    /// Finds a board by identifier.
    ///
    /// Returns `None` when the board does not exist.
    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>>;

    /// Stores a new board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateBoard`] when the identifier
    /// already exists.
    async fn store_board(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Persists title and colour changes to an existing board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::BoardNotFound`] when the board does
    /// not exist.
    async fn update_board(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Returns the board's columns with their tasks, each ordered by
    /// position.
    async fn columns_with_tasks(
        &self,
        board_id: BoardId,
    ) -> BoardRepositoryResult<Vec<ColumnWithTasks>>;

    /// Finds a column by identifier.
    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Stores a new column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::BoardNotFound`] when the parent
    /// board does not exist or [`BoardRepositoryError::DuplicateColumn`]
    /// when the identifier already exists.
    async fn store_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Persists a column title change.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the column
    /// does not exist.
    async fn update_column(&self, column: &Column) -> BoardRepositoryResult<()>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ColumnNotFound`] when the owning
    /// column does not exist or [`BoardRepositoryError::DuplicateTask`]
    /// when the identifier already exists.
    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Moves a task to `index` in `column_id`, recomputing positions.
    ///
    /// `index` is zero-based in the destination sequence with the task
    /// removed; values past the end append.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] or
    /// [`BoardRepositoryError::ColumnNotFound`] when either side is
    /// missing.
    async fn move_task(
        &self,
        task_id: TaskId,
        column_id: ColumnId,
        index: usize,
    ) -> BoardRepositoryResult<()>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A board with the same identifier already exists.
    #[error("duplicate board identifier: {0}")]
    DuplicateBoard(BoardId),

    /// A column with the same identifier already exists.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The board was not found.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
