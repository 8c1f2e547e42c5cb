//! Drop reconciliation: turns a completed drag into the final local order
//! and the single move that must be persisted.

use super::{BoardDomainError, ColumnId, CompletedDrag, DropTarget, OrderedBoard, TaskId};

/// The move to persist after a drop.
///
/// `to_index` is the zero-based index the task occupies in the destination
/// sequence after the move; appending is expressed as the pre-insertion
/// length of that sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovePlan {
    /// Moved task.
    pub task_id: TaskId,
    /// Column the task started the drag in.
    pub from_column_id: ColumnId,
    /// Index the task started the drag at.
    pub from_index: usize,
    /// Destination column.
    pub to_column_id: ColumnId,
    /// Destination index.
    pub to_index: usize,
}

impl MovePlan {
    /// Returns `true` when the task changes column.
    #[must_use]
    pub fn crosses_columns(&self) -> bool {
        self.from_column_id != self.to_column_id
    }
}

/// Outcome of reconciling a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDecision {
    /// The task ended where it started; nothing to persist.
    NoChange,
    /// The local model was updated and this move must be persisted.
    Move(MovePlan),
}

/// Applies the final optimistic mutation for `completed` and decides what to
/// persist.
///
/// * Dropping on another column appends the task to it.
/// * Dropping on a task in another column inserts at that task's index.
/// * Within the task's own column the hover-time order is authoritative. A
///   drop on a task the live reorder has not yet tracked first moves the
///   dragged task to that task's index. A move is persisted only if the
///   final index differs from the index the drag started at.
///
/// # Errors
///
/// Returns [`BoardDomainError::TaskNotFound`] when the dragged task has left
/// the model (for example after a reload during the drag), or
/// [`BoardDomainError::ColumnNotFound`] when the target column has.
pub fn plan_drop(
    board: &mut OrderedBoard,
    completed: &CompletedDrag,
) -> Result<DropDecision, BoardDomainError> {
    let task_id = completed.task_id;
    let current = board
        .locate(task_id)
        .ok_or(BoardDomainError::TaskNotFound(task_id))?;

    match completed.target {
        DropTarget::Column { column_id } if column_id != current.column_id => {
            let len = board
                .column(column_id)
                .ok_or(BoardDomainError::ColumnNotFound(column_id))?
                .task_count();
            let to_index = board.move_across_columns(task_id, current.column_id, column_id, len)?;
            Ok(DropDecision::Move(plan(completed, column_id, to_index)))
        }
        DropTarget::Task {
            column_id, index, ..
        } if column_id != current.column_id => {
            let to_index =
                board.move_across_columns(task_id, current.column_id, column_id, index)?;
            Ok(DropDecision::Move(plan(completed, column_id, to_index)))
        }
        DropTarget::Task {
            task_id: over_task,
            index,
            ..
        } => {
            let needs_reorder =
                over_task != task_id && !completed.already_tracked && index != current.index;
            if needs_reorder {
                board.move_within_column(current.column_id, current.index, index)?;
            }
            settle_in_place(board, completed)
        }
        DropTarget::Column { .. } => settle_in_place(board, completed),
    }
}

/// Compares the final position of a same-column drop with its origin.
fn settle_in_place(
    board: &OrderedBoard,
    completed: &CompletedDrag,
) -> Result<DropDecision, BoardDomainError> {
    let settled = board
        .locate(completed.task_id)
        .ok_or(BoardDomainError::TaskNotFound(completed.task_id))?;
    if settled == completed.origin {
        return Ok(DropDecision::NoChange);
    }
    Ok(DropDecision::Move(plan(completed, settled.column_id, settled.index)))
}

const fn plan(completed: &CompletedDrag, to_column_id: ColumnId, to_index: usize) -> MovePlan {
    MovePlan {
        task_id: completed.task_id,
        from_column_id: completed.origin.column_id,
        from_index: completed.origin.index,
        to_column_id,
        to_index,
    }
}
