//! Interactive board workspace.
//!
//! [`BoardWorkspace`] owns the ordered model for one open board and routes
//! presentation events through the drag session, drop reconciliation and
//! the synchronisation layer. Local changes are applied synchronously and
//! are visible at once; persistence happens afterwards.
//!
//! The workspace is driven from a single control flow. Callers that must
//! keep handling events while a move is being persisted can split
//! [`BoardWorkspace::finish_drag`] into [`BoardWorkspace::end_drag`],
//! [`MoveReconciler::commit`] on a cloned reconciler and
//! [`BoardWorkspace::apply_commit_outcome`].

use super::{
    config::{MoveFailurePolicy, WorkspaceConfig},
    reconcile::{MoveCommitOutcome, MoveReconciler},
    sync::{BoardSyncError, BoardSyncResult, BoardSyncService, BoardSnapshot},
};
use crate::board::{
    domain::{
        Board, BoardDomainError, BoardId, BoardUpdate, Column, ColumnId, ColumnWithTasks,
        DragEnd, DragSession, DropDecision, DroppableId, FilterCriteria, HoverOutcome, MovePlan,
        OrderedBoard, PendingDrop, Task, TaskDraft, TaskId, apply_filters, plan_drop,
    },
    ports::{BoardRepository, IdentityProvider},
};
use mockable::Clock;
use std::sync::Arc;

/// Load state of the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceStatus {
    /// No board has been opened yet.
    Unloaded,
    /// A board is loaded and interactive.
    Ready,
    /// The last load failed; nothing of the board is shown.
    LoadFailed(String),
}

/// What a drop did to the local model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReport {
    /// No drag was active.
    NotActive,
    /// Released over nothing; no persistence.
    Cancelled,
    /// Released over something that is not a column or task; no
    /// persistence.
    Invalid,
    /// The task ended where it started; no persistence.
    Unchanged,
    /// The local model was updated and this move needs persisting.
    Moved(MovePlan),
}

impl DropReport {
    /// Returns the move to persist, if any.
    #[must_use]
    pub const fn plan(&self) -> Option<&MovePlan> {
        match self {
            Self::Moved(plan) => Some(plan),
            Self::NotActive | Self::Cancelled | Self::Invalid | Self::Unchanged => None,
        }
    }
}

/// A completed drop together with its persistence outcome.
#[derive(Debug, Clone)]
pub struct FinishedDrag {
    /// Effect on the local model.
    pub report: DropReport,
    /// Persistence outcome when a move was issued.
    pub commit: Option<MoveCommitOutcome>,
}

/// Interaction controller for one open board.
pub struct BoardWorkspace<R, I, C>
where
    R: BoardRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    sync: Arc<BoardSyncService<R, I, C>>,
    reconciler: MoveReconciler<R, I, C>,
    config: WorkspaceConfig,
    board_id: Option<BoardId>,
    board: Option<Board>,
    model: OrderedBoard,
    session: DragSession,
    criteria: FilterCriteria,
    status: WorkspaceStatus,
    notice: Option<String>,
}

impl<R, I, C> BoardWorkspace<R, I, C>
where
    R: BoardRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates an empty workspace with the default configuration.
    #[must_use]
    pub fn new(sync: Arc<BoardSyncService<R, I, C>>) -> Self {
        Self::with_config(sync, WorkspaceConfig::default())
    }

    /// Creates an empty workspace with a custom configuration.
    #[must_use]
    pub fn with_config(sync: Arc<BoardSyncService<R, I, C>>, config: WorkspaceConfig) -> Self {
        Self {
            reconciler: MoveReconciler::new(Arc::clone(&sync)),
            sync,
            config,
            board_id: None,
            board: None,
            model: OrderedBoard::new(),
            session: DragSession::with_cancel_policy(config.cancel_policy),
            criteria: FilterCriteria::default(),
            status: WorkspaceStatus::Unloaded,
            notice: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Returns a handle for persisting moves outside `&mut self`.
    #[must_use]
    pub fn reconciler(&self) -> MoveReconciler<R, I, C> {
        self.reconciler.clone()
    }

    /// Returns the load state.
    #[must_use]
    pub const fn status(&self) -> &WorkspaceStatus {
        &self.status
    }

    /// Returns the last non-blocking error message, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Dismisses the non-blocking error message.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Returns the open board's metadata.
    #[must_use]
    pub const fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Returns the unfiltered ordered model.
    #[must_use]
    pub const fn model(&self) -> &OrderedBoard {
        &self.model
    }

    // ── Loading ────────────────────────────────────────────────────────

    /// Opens a board, replacing whatever was shown before.
    ///
    /// # Errors
    ///
    /// Returns the load error; the workspace is then in
    /// [`WorkspaceStatus::LoadFailed`] and shows no board.
    pub async fn open(&mut self, board_id: BoardId) -> BoardSyncResult<()> {
        self.board_id = Some(board_id);
        self.reload().await
    }

    /// Reloads the open board from storage, discarding local state.
    ///
    /// Any drag in progress is abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::NoBoardOpen`] before [`Self::open`], or the
    /// load error.
    pub async fn reload(&mut self) -> BoardSyncResult<()> {
        let board_id = self.board_id.ok_or(BoardSyncError::NoBoardOpen)?;
        match self.sync.load(board_id).await {
            Ok(snapshot) => self.install(snapshot),
            Err(error) => {
                self.fail_load(&error);
                Err(error)
            }
        }
    }

    fn install(&mut self, snapshot: BoardSnapshot) -> BoardSyncResult<()> {
        if let Err(source) = self.model.replace_all(snapshot.columns) {
            let failure = BoardSyncError::InconsistentBoard {
                board_id: snapshot.board.id(),
                source,
            };
            self.fail_load(&failure);
            return Err(failure);
        }
        self.board = Some(snapshot.board);
        self.session = DragSession::with_cancel_policy(self.config.cancel_policy);
        self.status = WorkspaceStatus::Ready;
        Ok(())
    }

    fn fail_load(&mut self, error: &BoardSyncError) {
        tracing::warn!(board_id = ?self.board_id, %error, "board load failed");
        self.board = None;
        self.model = OrderedBoard::new();
        self.session = DragSession::with_cancel_policy(self.config.cancel_policy);
        self.status = WorkspaceStatus::LoadFailed(error.to_string());
    }

    // ── Filtering ──────────────────────────────────────────────────────

    /// Returns the filtered columns for rendering.
    #[must_use]
    pub fn view(&self) -> Vec<ColumnWithTasks> {
        apply_filters(self.model.columns(), &self.criteria)
    }

    /// Returns the active filter criteria.
    #[must_use]
    pub const fn filters(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replaces the filter criteria.
    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    /// Number of tasks on the board, ignoring filters.
    #[must_use]
    pub fn total_task_count(&self) -> usize {
        self.model.total_task_count()
    }

    /// Number of tasks visible through the current filters.
    #[must_use]
    pub fn filtered_task_count(&self) -> usize {
        self.view().iter().map(ColumnWithTasks::task_count).sum()
    }

    // ── Drag and drop ──────────────────────────────────────────────────

    /// Starts dragging a task and returns it for overlay rendering.
    ///
    /// # Errors
    ///
    /// See [`DragSession::start`].
    pub fn drag_start(&mut self, task_id: TaskId) -> Result<&Task, BoardDomainError> {
        self.session.start(&self.model, task_id)
    }

    /// Handles the pointer moving over `over`.
    ///
    /// # Errors
    ///
    /// See [`DragSession::hover`].
    pub fn drag_over(&mut self, over: Option<DroppableId>) -> Result<HoverOutcome, BoardDomainError> {
        self.session.hover(&mut self.model, over)
    }

    /// Returns the task being dragged, for overlay rendering.
    #[must_use]
    pub fn active_task(&self) -> Option<&Task> {
        self.session.active_task()
    }

    /// Returns the drop target recorded by the last hover.
    #[must_use]
    pub fn pending_drop(&self) -> Option<PendingDrop> {
        self.session.pending()
    }

    /// Ends the drag and applies the optimistic result without persisting.
    ///
    /// A drop that cannot be reconciled is reported as
    /// [`DropReport::Invalid`] and changes nothing further.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the cancel policy cannot restore
    /// the origin column.
    pub fn end_drag(&mut self, over: Option<DroppableId>) -> Result<DropReport, BoardDomainError> {
        match self.session.finish(&mut self.model, over)? {
            DragEnd::NotActive => Ok(DropReport::NotActive),
            DragEnd::Cancelled { .. } => Ok(DropReport::Cancelled),
            DragEnd::Invalid { .. } => Ok(DropReport::Invalid),
            DragEnd::Dropped(completed) => match plan_drop(&mut self.model, &completed) {
                Ok(DropDecision::NoChange) => Ok(DropReport::Unchanged),
                Ok(DropDecision::Move(plan)) => Ok(DropReport::Moved(plan)),
                Err(error) => {
                    tracing::warn!(task_id = %completed.task_id, %error, "drop ignored");
                    Ok(DropReport::Invalid)
                }
            },
        }
    }

    /// Abandons the active drag, applying the cancel policy.
    ///
    /// # Errors
    ///
    /// See [`DragSession::finish`].
    pub fn cancel_drag(&mut self) -> Result<DropReport, BoardDomainError> {
        self.end_drag(None)
    }

    /// Applies the configured recovery for a persistence outcome.
    ///
    /// # Errors
    ///
    /// Returns the reload error when a failed move triggers a resync that
    /// also fails.
    pub async fn apply_commit_outcome(&mut self, outcome: &MoveCommitOutcome) -> BoardSyncResult<()> {
        match (outcome, self.config.move_failure_policy) {
            (MoveCommitOutcome::Committed(_), _)
            | (MoveCommitOutcome::Drifted { .. }, MoveFailurePolicy::KeepOptimistic) => Ok(()),
            (MoveCommitOutcome::Drifted { .. }, MoveFailurePolicy::Resync) => self.reload().await,
        }
    }

    /// Ends the drag, persists the resulting move and applies recovery.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Domain`] when the cancel policy fails, or
    /// the reload error when a resync after a failed move fails.
    pub async fn finish_drag(&mut self, over: Option<DroppableId>) -> BoardSyncResult<FinishedDrag> {
        let report = self.end_drag(over)?;
        let commit = match report {
            DropReport::Moved(plan) => {
                let outcome = self.reconciler.commit(plan).await;
                self.apply_commit_outcome(&outcome).await?;
                Some(outcome)
            }
            DropReport::NotActive
            | DropReport::Cancelled
            | DropReport::Invalid
            | DropReport::Unchanged => None,
        };
        Ok(FinishedDrag { report, commit })
    }

    // ── Editing ────────────────────────────────────────────────────────

    /// Updates the board title and colour, showing the change at once and
    /// reverting it if storage rejects it.
    ///
    /// # Errors
    ///
    /// Returns the validation or storage error, also kept as the notice.
    pub async fn update_board(&mut self, update: BoardUpdate) -> BoardSyncResult<Board> {
        let previous = self.board.clone().ok_or(BoardSyncError::NoBoardOpen)?;
        let mut optimistic = previous.clone();
        if let Err(error) = optimistic.apply_update(&update, &**self.sync.clock()) {
            return Err(self.note(error.into()));
        }
        self.board = Some(optimistic);
        match self.sync.update_board_meta(previous.id(), &update).await {
            Ok(board) => {
                self.board = Some(board.clone());
                Ok(board)
            }
            Err(error) => {
                self.board = Some(previous);
                Err(self.note(error))
            }
        }
    }

    /// Renames a column, showing the change at once and reverting it if
    /// storage rejects it.
    ///
    /// # Errors
    ///
    /// Returns the validation or storage error, also kept as the notice.
    pub async fn rename_column(&mut self, column_id: ColumnId, title: &str) -> BoardSyncResult<Column> {
        let previous = self
            .model
            .column(column_id)
            .map(|entry| entry.column().title().to_owned())
            .ok_or(BoardDomainError::ColumnNotFound(column_id))?;
        if let Err(error) = self.model.rename_column(column_id, title) {
            return Err(self.note(error.into()));
        }
        match self.sync.update_column_title(column_id, title).await {
            Ok(column) => Ok(column),
            Err(error) => {
                if let Err(revert) = self.model.rename_column(column_id, &previous) {
                    tracing::warn!(%column_id, error = %revert, "could not restore column title");
                }
                Err(self.note(error))
            }
        }
    }

    /// Creates a column at the end of the open board.
    ///
    /// # Errors
    ///
    /// Returns the validation or storage error, also kept as the notice.
    pub async fn create_column(&mut self, title: &str) -> BoardSyncResult<Column> {
        let board_id = self.board_id.ok_or(BoardSyncError::NoBoardOpen)?;
        let column = match self.sync.create_column(board_id, title).await {
            Ok(column) => column,
            Err(error) => return Err(self.note(error)),
        };
        if let Err(error) = self.model.push_column(ColumnWithTasks::empty(column.clone())) {
            return Err(self.note(error.into()));
        }
        Ok(column)
    }

    /// Creates a task at the end of `column_id`.
    ///
    /// # Errors
    ///
    /// Returns the validation or storage error, also kept as the notice.
    pub async fn create_task(&mut self, column_id: ColumnId, draft: TaskDraft) -> BoardSyncResult<Task> {
        let task = match self.sync.create_task(column_id, draft).await {
            Ok(task) => task,
            Err(error) => return Err(self.note(error)),
        };
        if let Err(error) = self.model.push_task(task.clone()) {
            return Err(self.note(error.into()));
        }
        Ok(task)
    }

    /// Creates a task at the end of the first column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::NoColumnAvailable`] when the board has no
    /// columns, otherwise as [`Self::create_task`].
    pub async fn create_task_in_first_column(&mut self, draft: TaskDraft) -> BoardSyncResult<Task> {
        let Some(column_id) = self.model.columns().first().map(ColumnWithTasks::id) else {
            return Err(self.note(BoardSyncError::NoColumnAvailable));
        };
        self.create_task(column_id, draft).await
    }

    /// Records a non-blocking failure and hands it back.
    fn note(&mut self, error: BoardSyncError) -> BoardSyncError {
        tracing::warn!(%error, "board edit failed");
        self.notice = Some(error.to_string());
        error
    }
}
