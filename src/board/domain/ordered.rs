//! In-memory ordered model of one board's columns and tasks.
//!
//! [`OrderedBoard`] is the single mutable structure the interaction loop
//! owns. Columns are kept in position order and each column holds its tasks
//! in display order. Every mutation is synchronous and keeps task
//! identifiers unique across the whole board.

use super::{BoardDomainError, Column, ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A column together with its tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnWithTasks {
    column: Column,
    tasks: Vec<Task>,
}

impl ColumnWithTasks {
    /// Pairs a column with its tasks.
    ///
    /// Ordering and membership are validated when the value is handed to an
    /// [`OrderedBoard`].
    #[must_use]
    pub const fn new(column: Column, tasks: Vec<Task>) -> Self {
        Self { column, tasks }
    }

    /// Creates a column with no tasks.
    #[must_use]
    pub const fn empty(column: Column) -> Self {
        Self::new(column, Vec::new())
    }

    /// Returns the column.
    #[must_use]
    pub const fn column(&self) -> &Column {
        &self.column
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.column.id()
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks shown in the column badge.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the task identifiers in display order.
    #[must_use]
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(Task::id).collect()
    }

    /// Returns the index of `task_id` within this column.
    #[must_use]
    pub fn index_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    /// Splits the value into its column and tasks.
    #[must_use]
    pub fn into_parts(self) -> (Column, Vec<Task>) {
        (self.column, self.tasks)
    }

    pub(crate) fn retain_tasks(&mut self, keep: impl FnMut(&Task) -> bool) {
        self.tasks.retain(keep);
    }

    pub(crate) fn rename(&mut self, title: &str) -> Result<(), BoardDomainError> {
        self.column.rename(title)
    }

    /// Rewrites task positions to the contiguous sequence `0..len`.
    fn renumber(&mut self) {
        let column_id = self.column.id();
        for (index, task) in self.tasks.iter_mut().enumerate() {
            task.place(column_id, position_for(index));
        }
    }
}

/// Where a task currently sits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskLocation {
    /// Column holding the task.
    pub column_id: ColumnId,
    /// Zero-based index within the column's task sequence.
    pub index: usize,
}

/// Board-scoped ordered collection of columns and their tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedBoard {
    columns: Vec<ColumnWithTasks>,
}

impl OrderedBoard {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model from freshly loaded columns.
    ///
    /// # Errors
    ///
    /// See [`OrderedBoard::replace_all`].
    pub fn from_columns(columns: Vec<ColumnWithTasks>) -> Result<Self, BoardDomainError> {
        let mut board = Self::new();
        board.replace_all(columns)?;
        Ok(board)
    }

    /// Overwrites the whole model with freshly loaded columns.
    ///
    /// Columns are sorted by position and tasks by position within each
    /// column. Both sorts are stable, so equal positions keep the order in
    /// which they were supplied. Stored positions are not rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateColumn`],
    /// [`BoardDomainError::DuplicateTask`] or
    /// [`BoardDomainError::TaskColumnMismatch`] when the input breaks the
    /// board invariants. The current model is left untouched on error.
    pub fn replace_all(&mut self, columns: Vec<ColumnWithTasks>) -> Result<(), BoardDomainError> {
        validate_membership(&columns)?;
        let mut sorted = columns;
        sorted.sort_by_key(|entry| entry.column.position());
        for entry in &mut sorted {
            entry.tasks.sort_by_key(Task::position);
        }
        self.columns = sorted;
        Ok(())
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnWithTasks] {
        &self.columns
    }

    /// Returns a copy of every column, for snapshots and filtering.
    #[must_use]
    pub fn to_columns(&self) -> Vec<ColumnWithTasks> {
        self.columns.clone()
    }

    /// Returns `true` when the board has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Looks up a column by identifier.
    #[must_use]
    pub fn column(&self, column_id: ColumnId) -> Option<&ColumnWithTasks> {
        self.columns.iter().find(|entry| entry.id() == column_id)
    }

    /// Returns the task identifiers of a column in display order.
    #[must_use]
    pub fn task_ids(&self, column_id: ColumnId) -> Option<Vec<TaskId>> {
        self.column(column_id).map(ColumnWithTasks::task_ids)
    }

    /// Finds the column and index currently holding `task_id`.
    #[must_use]
    pub fn locate(&self, task_id: TaskId) -> Option<TaskLocation> {
        self.columns.iter().find_map(|entry| {
            entry.index_of(task_id).map(|index| TaskLocation {
                column_id: entry.id(),
                index,
            })
        })
    }

    /// Looks up a task anywhere on the board.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.columns
            .iter()
            .flat_map(|entry| entry.tasks.iter())
            .find(|task| task.id() == task_id)
    }

    /// Total number of tasks across all columns.
    #[must_use]
    pub fn total_task_count(&self) -> usize {
        self.columns.iter().map(ColumnWithTasks::task_count).sum()
    }

    /// Moves the task at `from_index` to `to_index` within one column.
    ///
    /// Intervening tasks shift by one place. Moving an index onto itself is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] for an unknown column or
    /// [`BoardDomainError::IndexOutOfBounds`] when either index is outside
    /// the column's sequence.
    pub fn move_within_column(
        &mut self,
        column_id: ColumnId,
        from_index: usize,
        to_index: usize,
    ) -> Result<(), BoardDomainError> {
        let entry = self.column_mut(column_id)?;
        let len = entry.tasks.len();
        for index in [from_index, to_index] {
            if index >= len {
                return Err(BoardDomainError::IndexOutOfBounds {
                    column_id,
                    index,
                    len,
                });
            }
        }
        if from_index == to_index {
            return Ok(());
        }
        let task = entry.tasks.remove(from_index);
        entry.tasks.insert(to_index, task);
        entry.renumber();
        Ok(())
    }

    /// Moves a task from one column into another at `to_index`.
    ///
    /// The index is clamped to `[0, len]` of the destination sequence and
    /// the clamped value is returned. The task's column reference is
    /// reassigned; the relative order of every other task is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] when either column is
    /// unknown or [`BoardDomainError::TaskNotInColumn`] when the task is not
    /// held by `from_column_id`.
    pub fn move_across_columns(
        &mut self,
        task_id: TaskId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
        to_index: usize,
    ) -> Result<usize, BoardDomainError> {
        if self.column(to_column_id).is_none() {
            return Err(BoardDomainError::ColumnNotFound(to_column_id));
        }
        let source = self.column_mut(from_column_id)?;
        let from_index = source
            .index_of(task_id)
            .ok_or(BoardDomainError::TaskNotInColumn {
                task_id,
                column_id: from_column_id,
            })?;
        let task = source.tasks.remove(from_index);
        source.renumber();

        let destination = self.column_mut(to_column_id)?;
        let clamped = to_index.min(destination.tasks.len());
        destination.tasks.insert(clamped, task);
        destination.renumber();
        Ok(clamped)
    }

    /// Reorders a column so its tasks follow `order`.
    ///
    /// Tasks missing from `order` keep their relative order after the listed
    /// ones; identifiers in `order` that the column does not hold are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] for an unknown column.
    pub fn restore_column_order(
        &mut self,
        column_id: ColumnId,
        order: &[TaskId],
    ) -> Result<(), BoardDomainError> {
        let entry = self.column_mut(column_id)?;
        let rank = |task: &Task| {
            order
                .iter()
                .position(|id| *id == task.id())
                .unwrap_or(order.len())
        };
        entry.tasks.sort_by_key(rank);
        entry.renumber();
        Ok(())
    }

    /// Appends a newly created column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateColumn`],
    /// [`BoardDomainError::DuplicateTask`] or
    /// [`BoardDomainError::TaskColumnMismatch`] when the column conflicts
    /// with the current model.
    pub fn push_column(&mut self, column: ColumnWithTasks) -> Result<(), BoardDomainError> {
        let mut candidate = self.columns.clone();
        candidate.push(column);
        validate_membership(&candidate)?;
        self.columns = candidate;
        Ok(())
    }

    /// Appends a newly created task to the end of its column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateTask`] when the identifier is
    /// already on the board or [`BoardDomainError::ColumnNotFound`] when
    /// the task's column is unknown.
    pub fn push_task(&mut self, task: Task) -> Result<(), BoardDomainError> {
        if self.locate(task.id()).is_some() {
            return Err(BoardDomainError::DuplicateTask(task.id()));
        }
        let entry = self.column_mut(task.column_id())?;
        entry.tasks.push(task);
        Ok(())
    }

    /// Replaces a column's title in place.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] or
    /// [`BoardDomainError::EmptyColumnTitle`].
    pub fn rename_column(&mut self, column_id: ColumnId, title: &str) -> Result<(), BoardDomainError> {
        self.column_mut(column_id)?.rename(title)
    }

    fn column_mut(&mut self, column_id: ColumnId) -> Result<&mut ColumnWithTasks, BoardDomainError> {
        self.columns
            .iter_mut()
            .find(|entry| entry.id() == column_id)
            .ok_or(BoardDomainError::ColumnNotFound(column_id))
    }
}

pub(crate) fn validate_membership(columns: &[ColumnWithTasks]) -> Result<(), BoardDomainError> {
    let mut column_ids = HashSet::new();
    let mut task_ids = HashSet::new();
    for entry in columns {
        if !column_ids.insert(entry.id()) {
            return Err(BoardDomainError::DuplicateColumn(entry.id()));
        }
        for task in &entry.tasks {
            if task.column_id() != entry.id() {
                return Err(BoardDomainError::TaskColumnMismatch {
                    task_id: task.id(),
                    expected: entry.id(),
                    found: task.column_id(),
                });
            }
            if !task_ids.insert(task.id()) {
                return Err(BoardDomainError::DuplicateTask(task.id()));
            }
        }
    }
    Ok(())
}

/// Converts a sequence index into a stored position.
pub(crate) fn position_for(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
