//! In-memory repository for boards, columns and tasks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{
        Board, BoardId, Column, ColumnId, ColumnWithTasks, Task, TaskId, UserId, position_for,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};

/// Thread-safe in-memory board repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    boards: HashMap<BoardId, Stored<Board>>,
    columns: HashMap<ColumnId, Stored<Column>>,
    tasks: HashMap<TaskId, Stored<Task>>,
    next_sequence: u64,
}

/// A stored entity with its tie-break sequence number.
#[derive(Debug, Clone)]
struct Stored<T> {
    value: T,
    sequence: u64,
}

impl InMemoryBoardState {
    fn next_sequence(&mut self) -> u64 {
        self.next_sequence += 1;
        self.next_sequence
    }

    /// Task identifiers of a column ordered by position, then sequence.
    fn ordered_task_ids(&self, column_id: ColumnId, excluding: Option<TaskId>) -> Vec<TaskId> {
        let mut entries: Vec<&Stored<Task>> = self
            .tasks
            .values()
            .filter(|stored| stored.value.column_id() == column_id)
            .filter(|stored| Some(stored.value.id()) != excluding)
            .collect();
        entries.sort_by_key(|stored| (stored.value.position(), stored.sequence));
        entries.iter().map(|stored| stored.value.id()).collect()
    }

    /// Writes contiguous positions for `ids` into `column_id`.
    fn renumber(&mut self, column_id: ColumnId, ids: &[TaskId]) {
        for (index, task_id) in ids.iter().enumerate() {
            if let Some(stored) = self.tasks.get_mut(task_id) {
                stored.value.place(column_id, position_for(index));
            }
        }
    }

    fn column_with_tasks(&self, column: &Column) -> ColumnWithTasks {
        let tasks = self
            .ordered_task_ids(column.id(), None)
            .iter()
            .filter_map(|task_id| self.tasks.get(task_id))
            .map(|stored| stored.value.clone())
            .collect();
        ColumnWithTasks::new(column.clone(), tasks)
    }
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> BoardRepositoryResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> BoardRepositoryResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn list_boards(&self, owner: &UserId) -> BoardRepositoryResult<Vec<Board>> {
        let state = self.read()?;
        let mut boards: Vec<&Stored<Board>> = state
            .boards
            .values()
            .filter(|stored| stored.value.is_owned_by(owner))
            .collect();
        boards.sort_by_key(|stored| (stored.value.created_at(), stored.sequence));
        Ok(boards
            .into_iter()
            .rev()
            .map(|stored| stored.value.clone())
            .collect())
    }

    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        let state = self.read()?;
        Ok(state.boards.get(&id).map(|stored| stored.value.clone()))
    }

    async fn store_board(&self, board: &Board) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if state.boards.contains_key(&board.id()) {
            return Err(BoardRepositoryError::DuplicateBoard(board.id()));
        }
        let sequence = state.next_sequence();
        state.boards.insert(
            board.id(),
            Stored {
                value: board.clone(),
                sequence,
            },
        );
        Ok(())
    }

    async fn update_board(&self, board: &Board) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .boards
            .get_mut(&board.id())
            .ok_or(BoardRepositoryError::BoardNotFound(board.id()))?;
        stored.value = board.clone();
        Ok(())
    }

    async fn columns_with_tasks(
        &self,
        board_id: BoardId,
    ) -> BoardRepositoryResult<Vec<ColumnWithTasks>> {
        let state = self.read()?;
        if !state.boards.contains_key(&board_id) {
            return Err(BoardRepositoryError::BoardNotFound(board_id));
        }
        let mut columns: Vec<&Stored<Column>> = state
            .columns
            .values()
            .filter(|stored| stored.value.board_id() == board_id)
            .collect();
        columns.sort_by_key(|stored| (stored.value.position(), stored.sequence));
        Ok(columns
            .into_iter()
            .map(|stored| state.column_with_tasks(&stored.value))
            .collect())
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        let state = self.read()?;
        Ok(state.columns.get(&id).map(|stored| stored.value.clone()))
    }

    async fn store_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.boards.contains_key(&column.board_id()) {
            return Err(BoardRepositoryError::BoardNotFound(column.board_id()));
        }
        if state.columns.contains_key(&column.id()) {
            return Err(BoardRepositoryError::DuplicateColumn(column.id()));
        }
        let sequence = state.next_sequence();
        state.columns.insert(
            column.id(),
            Stored {
                value: column.clone(),
                sequence,
            },
        );
        Ok(())
    }

    async fn update_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .columns
            .get_mut(&column.id())
            .ok_or(BoardRepositoryError::ColumnNotFound(column.id()))?;
        stored.value = column.clone();
        Ok(())
    }

    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.columns.contains_key(&task.column_id()) {
            return Err(BoardRepositoryError::ColumnNotFound(task.column_id()));
        }
        if state.tasks.contains_key(&task.id()) {
            return Err(BoardRepositoryError::DuplicateTask(task.id()));
        }
        let sequence = state.next_sequence();
        state.tasks.insert(
            task.id(),
            Stored {
                value: task.clone(),
                sequence,
            },
        );
        Ok(())
    }

    async fn move_task(
        &self,
        task_id: TaskId,
        column_id: ColumnId,
        index: usize,
    ) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.columns.contains_key(&column_id) {
            return Err(BoardRepositoryError::ColumnNotFound(column_id));
        }
        let source_column = state
            .tasks
            .get(&task_id)
            .map(|stored| stored.value.column_id())
            .ok_or(BoardRepositoryError::TaskNotFound(task_id))?;

        let source_ids = state.ordered_task_ids(source_column, Some(task_id));
        let mut destination_ids = state.ordered_task_ids(column_id, Some(task_id));
        let clamped = index.min(destination_ids.len());
        destination_ids.insert(clamped, task_id);

        let sequence = state.next_sequence();
        if let Some(stored) = state.tasks.get_mut(&task_id) {
            stored.sequence = sequence;
        }
        if source_column != column_id {
            state.renumber(source_column, &source_ids);
        }
        state.renumber(column_id, &destination_ids);
        Ok(())
    }
}
