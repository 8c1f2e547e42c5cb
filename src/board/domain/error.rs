//! Error types for board model validation and ordering operations.

use super::{ColumnId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or reordering board entities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The board title is empty after trimming.
    #[error("board title must not be empty")]
    EmptyBoardTitle,

    /// The board colour tag is empty after trimming.
    #[error("board colour must not be empty")]
    EmptyBoardColor,

    /// The column title is empty after trimming.
    #[error("column title must not be empty")]
    EmptyColumnTitle,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The referenced column is not part of the board.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The referenced task is not part of the board.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task is not in the column it was expected in.
    #[error("task {task_id} is not in column {column_id}")]
    TaskNotInColumn {
        /// Task identifier.
        task_id: TaskId,
        /// Column the task was expected in.
        column_id: ColumnId,
    },

    /// A sequence index is outside the column's task sequence.
    #[error("index {index} is out of bounds for column {column_id} with {len} tasks")]
    IndexOutOfBounds {
        /// Column identifier.
        column_id: ColumnId,
        /// Offending index.
        index: usize,
        /// Length of the column's task sequence.
        len: usize,
    },

    /// The same task identifier appears more than once on the board.
    #[error("duplicate task identifier on board: {0}")]
    DuplicateTask(TaskId),

    /// The same column identifier appears more than once on the board.
    #[error("duplicate column identifier on board: {0}")]
    DuplicateColumn(ColumnId),

    /// A task's column reference disagrees with the column holding it.
    #[error("task {task_id} references column {found} but is held by column {expected}")]
    TaskColumnMismatch {
        /// Task identifier.
        task_id: TaskId,
        /// Column that holds the task.
        expected: ColumnId,
        /// Column the task references.
        found: ColumnId,
    },

    /// A drag was started while another drag is still active.
    #[error("a drag of task {0} is already active")]
    DragAlreadyActive(TaskId),
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
