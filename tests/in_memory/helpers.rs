//! Shared test helpers for in-memory board integration tests.

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use taskboard::board::{
    adapters::memory::{InMemoryBoardRepository, StaticIdentityProvider},
    domain::{
        Board, BoardId, Column, ColumnId, ColumnWithTasks, DroppableId, OrderedBoard, Task,
        TaskDraft, TaskId, UserId,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
    services::{
        BoardCatalogService, BoardSyncService, BoardWorkspace, CatalogConfig, WorkspaceConfig,
    },
};

/// A recorded `move_task` call.
pub type MoveCall = (TaskId, ColumnId, usize);

/// In-memory repository whose writes can be made to fail on demand.
#[derive(Debug, Clone, Default)]
pub struct FlakyRepository {
    inner: InMemoryBoardRepository,
    fail_moves: Arc<AtomicBool>,
    fail_updates: Arc<AtomicBool>,
    repeat_first_column: Arc<AtomicBool>,
    moves: Arc<Mutex<Vec<MoveCall>>>,
}

impl FlakyRepository {
    /// Makes every subsequent `move_task` call fail.
    pub fn fail_moves(&self) {
        self.fail_moves.store(true, Ordering::SeqCst);
    }

    /// Makes every subsequent board or column update fail.
    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    /// Makes board reads return the first column twice, as a corrupted
    /// store would.
    pub fn repeat_first_column(&self) {
        self.repeat_first_column.store(true, Ordering::SeqCst);
    }

    /// Returns every `move_task` call received so far, failed ones included.
    #[must_use]
    pub fn moves(&self) -> Vec<MoveCall> {
        self.moves.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn outage() -> BoardRepositoryError {
        BoardRepositoryError::persistence(std::io::Error::other("storage unavailable"))
    }

    fn guard(flag: &AtomicBool) -> BoardRepositoryResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }
        Ok(())
    }
}

#[async_trait]
impl BoardRepository for FlakyRepository {
    async fn list_boards(&self, owner: &UserId) -> BoardRepositoryResult<Vec<Board>> {
        self.inner.list_boards(owner).await
    }

    async fn find_board(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.inner.find_board(id).await
    }

    async fn store_board(&self, board: &Board) -> BoardRepositoryResult<()> {
        self.inner.store_board(board).await
    }

    async fn update_board(&self, board: &Board) -> BoardRepositoryResult<()> {
        Self::guard(&self.fail_updates)?;
        self.inner.update_board(board).await
    }

    async fn columns_with_tasks(
        &self,
        board_id: BoardId,
    ) -> BoardRepositoryResult<Vec<ColumnWithTasks>> {
        let mut columns = self.inner.columns_with_tasks(board_id).await?;
        if self.repeat_first_column.load(Ordering::SeqCst) {
            if let Some(first) = columns.first().cloned() {
                columns.push(first);
            }
        }
        Ok(columns)
    }

    async fn find_column(&self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.inner.find_column(id).await
    }

    async fn store_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        self.inner.store_column(column).await
    }

    async fn update_column(&self, column: &Column) -> BoardRepositoryResult<()> {
        Self::guard(&self.fail_updates)?;
        self.inner.update_column(column).await
    }

    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        self.inner.store_task(task).await
    }

    async fn move_task(
        &self,
        task_id: TaskId,
        column_id: ColumnId,
        index: usize,
    ) -> BoardRepositoryResult<()> {
        if let Ok(mut calls) = self.moves.lock() {
            calls.push((task_id, column_id, index));
        }
        Self::guard(&self.fail_moves)?;
        self.inner.move_task(task_id, column_id, index).await
    }
}

/// Workspace type used by the integration tests.
pub type TestWorkspace = BoardWorkspace<FlakyRepository, StaticIdentityProvider, DefaultClock>;

/// Catalogue type used by the integration tests.
pub type TestCatalog = BoardCatalogService<FlakyRepository, StaticIdentityProvider, DefaultClock>;

/// Storage, identity and services sharing the same state.
pub struct Harness {
    /// Repository shared by every service.
    pub repository: Arc<FlakyRepository>,
    /// Identity shared by every service.
    pub identity: Arc<StaticIdentityProvider>,
    /// Synchronisation service.
    pub sync: Arc<BoardSyncService<FlakyRepository, StaticIdentityProvider, DefaultClock>>,
}

impl Harness {
    /// Creates services over empty storage, signed in as `alice`.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(FlakyRepository::default());
        let identity = Arc::new(StaticIdentityProvider::signed_in(alice()));
        let sync = Arc::new(BoardSyncService::new(
            Arc::clone(&repository),
            Arc::clone(&identity),
            Arc::new(DefaultClock),
        ));
        Self {
            repository,
            identity,
            sync,
        }
    }

    /// Returns a catalogue service using `config`.
    #[must_use]
    pub fn catalog(&self, config: CatalogConfig) -> TestCatalog {
        BoardCatalogService::with_config(
            Arc::clone(&self.repository),
            Arc::clone(&self.identity),
            Arc::new(DefaultClock),
            config,
        )
    }

    /// Returns a fresh workspace using `config`.
    #[must_use]
    pub fn workspace(&self, config: WorkspaceConfig) -> TestWorkspace {
        BoardWorkspace::with_config(Arc::clone(&self.sync), config)
    }

    /// Creates a board with the default columns and `tasks` added to the
    /// first column in order.
    ///
    /// # Errors
    ///
    /// Returns an error when any creation step fails.
    pub async fn seed_board(&self, tasks: &[&str]) -> eyre::Result<BoardId> {
        let snapshot = self
            .catalog(CatalogConfig::default())
            .create_board("Launch", Board::DEFAULT_COLOR)
            .await?;
        let first = snapshot
            .columns
            .first()
            .map(ColumnWithTasks::id)
            .ok_or_else(|| eyre::eyre!("board created without columns"))?;
        for title in tasks {
            self.sync.create_task(first, TaskDraft::new(*title)?).await?;
        }
        Ok(snapshot.board.id())
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// The default signed-in user.
#[must_use]
pub fn alice() -> UserId {
    UserId::new("alice").expect("valid user id")
}

/// Provides fresh services for each test.
#[fixture]
pub fn harness() -> Harness {
    Harness::new()
}

/// Looks up a column by title.
///
/// # Errors
///
/// Returns an error when no column has that title.
pub fn column_id(model: &OrderedBoard, title: &str) -> eyre::Result<ColumnId> {
    model
        .columns()
        .iter()
        .find(|entry| entry.column().title() == title)
        .map(ColumnWithTasks::id)
        .ok_or_else(|| eyre::eyre!("no column titled {title}"))
}

/// Looks up a task by title anywhere on the board.
///
/// # Errors
///
/// Returns an error when no task has that title.
pub fn task_id(model: &OrderedBoard, title: &str) -> eyre::Result<TaskId> {
    model
        .columns()
        .iter()
        .flat_map(ColumnWithTasks::tasks)
        .find(|task| task.title() == title)
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("no task titled {title}"))
}

/// Droppable id of a task, by title.
///
/// # Errors
///
/// Returns an error when no task has that title.
pub fn over_task(model: &OrderedBoard, title: &str) -> eyre::Result<Option<DroppableId>> {
    Ok(Some(DroppableId::from(task_id(model, title)?)))
}

/// Droppable id of a column, by title.
///
/// # Errors
///
/// Returns an error when no column has that title.
pub fn over_column(model: &OrderedBoard, title: &str) -> eyre::Result<Option<DroppableId>> {
    Ok(Some(DroppableId::from(column_id(model, title)?)))
}

/// Task titles of a column in display order.
#[must_use]
pub fn titles(columns: &[ColumnWithTasks], column_title: &str) -> Vec<String> {
    columns
        .iter()
        .find(|entry| entry.column().title() == column_title)
        .map(|entry| entry.tasks().iter().map(|task| task.title().to_owned()).collect())
        .unwrap_or_default()
}
