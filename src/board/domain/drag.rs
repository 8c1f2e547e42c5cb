//! Drag session state machine.
//!
//! A session is either idle or tracking one dragged task. While active,
//! hover events over a task in the dragged task's own column reorder that
//! column immediately so the view follows the pointer. Hovering another
//! column only records a pending drop target; cross-column moves happen at
//! drop time. Nothing here talks to storage.

use super::{BoardDomainError, ColumnId, OrderedBoard, Task, TaskId, TaskLocation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a draggable or droppable element, as reported by
/// the presentation layer.
///
/// Columns and tasks share one identifier space; [`OrderedBoard::resolve`]
/// decides which one an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DroppableId(Uuid);

impl DroppableId {
    /// Wraps a raw element identifier.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl From<ColumnId> for DroppableId {
    fn from(value: ColumnId) -> Self {
        Self(value.into_inner())
    }
}

impl From<TaskId> for DroppableId {
    fn from(value: TaskId) -> Self {
        Self(value.into_inner())
    }
}

impl fmt::Display for DroppableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// The column itself, not any task in it.
    Column {
        /// Hovered column.
        column_id: ColumnId,
    },
    /// A task inside a column.
    Task {
        /// Column holding the hovered task.
        column_id: ColumnId,
        /// Hovered task.
        task_id: TaskId,
        /// Index of the hovered task within its column.
        index: usize,
    },
}

impl DropTarget {
    /// Returns the column the target belongs to.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        match *self {
            Self::Column { column_id } | Self::Task { column_id, .. } => column_id,
        }
    }
}

impl OrderedBoard {
    /// Resolves a presentation identifier against the current model.
    ///
    /// Column identifiers are checked before task identifiers. Returns
    /// `None` when the identifier matches nothing on the board.
    #[must_use]
    pub fn resolve(&self, id: DroppableId) -> Option<DropTarget> {
        let raw = id.into_inner();
        let column_id = ColumnId::from_uuid(raw);
        if self.column(column_id).is_some() {
            return Some(DropTarget::Column { column_id });
        }
        let task_id = TaskId::from_uuid(raw);
        self.locate(task_id).map(|location| DropTarget::Task {
            column_id: location.column_id,
            task_id,
            index: location.index,
        })
    }
}

/// What happens to the hover-time order when a drag ends without a target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Keep whatever order the live reorder produced.
    #[default]
    KeepHoverOrder,
    /// Put the origin column back into its pre-drag order.
    RevertToOrigin,
}

/// The drop target recorded during hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDrop {
    /// Column the task would land in.
    pub column_id: ColumnId,
    /// Index the task would take in that column.
    pub index: usize,
}

/// Result of a hover event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    /// No drag is active.
    Ignored,
    /// The pointer left every droppable; the pending target was cleared.
    Cleared,
    /// Nothing changed.
    Unchanged,
    /// The dragged task was moved within its own column.
    Reordered {
        /// Column that was reordered.
        column_id: ColumnId,
        /// Previous index of the dragged task.
        from: usize,
        /// New index of the dragged task.
        to: usize,
    },
    /// A drop target in another column was recorded.
    Pending(PendingDrop),
}

/// A drag released over a resolvable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedDrag {
    /// The dragged task.
    pub task_id: TaskId,
    /// Where the task was when the drag started.
    pub origin: TaskLocation,
    /// Resolved drop target.
    pub target: DropTarget,
    /// `true` when the live reorder already reflects this target.
    pub already_tracked: bool,
}

/// How a drag session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    /// No drag was active.
    NotActive,
    /// Released over nothing, or explicitly cancelled.
    Cancelled {
        /// The dragged task.
        task_id: TaskId,
    },
    /// Released over an element that does not resolve to a column or task.
    Invalid {
        /// The dragged task.
        task_id: TaskId,
    },
    /// Released over a resolvable target.
    Dropped(CompletedDrag),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveDrag {
    task: Task,
    origin: TaskLocation,
    origin_order: Vec<TaskId>,
    pending: Option<PendingDrop>,
    last_over: Option<DroppableId>,
}

/// Drag lifecycle: `Idle -> Active(task) -> Idle`.
///
/// # Examples
///
/// ```
/// use taskboard::board::domain::{DragSession, OrderedBoard};
///
/// let mut board = OrderedBoard::new();
/// let mut session = DragSession::new();
/// assert!(!session.is_active());
/// assert!(session.finish(&mut board, None).is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    active: Option<ActiveDrag>,
    cancel_policy: CancelPolicy,
}

impl DragSession {
    /// Creates an idle session that keeps the hover order on cancel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle session with the given cancel policy.
    #[must_use]
    pub const fn with_cancel_policy(cancel_policy: CancelPolicy) -> Self {
        Self {
            active: None,
            cancel_policy,
        }
    }

    /// Returns the cancel policy.
    #[must_use]
    pub const fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy
    }

    /// Returns `true` while a task is being dragged.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the dragged task as it was when the drag started, for
    /// overlay rendering.
    #[must_use]
    pub fn active_task(&self) -> Option<&Task> {
        self.active.as_ref().map(|drag| &drag.task)
    }

    /// Returns the pending drop target recorded by the last hover.
    #[must_use]
    pub fn pending(&self) -> Option<PendingDrop> {
        self.active.as_ref().and_then(|drag| drag.pending)
    }

    /// Returns where the dragged task started.
    #[must_use]
    pub fn origin(&self) -> Option<TaskLocation> {
        self.active.as_ref().map(|drag| drag.origin)
    }

    /// Starts dragging `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DragAlreadyActive`] when a drag is in
    /// progress or [`BoardDomainError::TaskNotFound`] when the task is not
    /// on the board.
    pub fn start(&mut self, board: &OrderedBoard, task_id: TaskId) -> Result<&Task, BoardDomainError> {
        if let Some(drag) = &self.active {
            return Err(BoardDomainError::DragAlreadyActive(drag.task.id()));
        }
        let origin = board
            .locate(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        let task = board
            .task(task_id)
            .cloned()
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        let origin_order = board.task_ids(origin.column_id).unwrap_or_default();
        tracing::debug!(%task_id, column_id = %origin.column_id, index = origin.index, "drag started");
        let drag = self.active.insert(ActiveDrag {
            task,
            origin,
            origin_order,
            pending: None,
            last_over: None,
        });
        Ok(&drag.task)
    }

    /// Handles the pointer moving over `over`, or over nothing when `None`.
    ///
    /// Repeated events for the element already hovered are ignored, so a
    /// reorder is applied once per target rather than on every pointer move.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardDomainError`] from the live reorder; the session
    /// stays active.
    pub fn hover(
        &mut self,
        board: &mut OrderedBoard,
        over: Option<DroppableId>,
    ) -> Result<HoverOutcome, BoardDomainError> {
        let Some(drag) = self.active.as_mut() else {
            return Ok(HoverOutcome::Ignored);
        };
        if over.is_some() && over == drag.last_over {
            return Ok(HoverOutcome::Unchanged);
        }
        drag.last_over = over;

        let dragged = drag.task.id();
        let current = board
            .locate(dragged)
            .ok_or(BoardDomainError::TaskNotFound(dragged))?;
        let Some(target) = over.and_then(|id| board.resolve(id)) else {
            drag.pending = None;
            return Ok(HoverOutcome::Cleared);
        };

        match target {
            DropTarget::Task {
                column_id, index, ..
            } if column_id == current.column_id => {
                drag.pending = Some(PendingDrop { column_id, index });
                if index == current.index {
                    return Ok(HoverOutcome::Unchanged);
                }
                board.move_within_column(column_id, current.index, index)?;
                tracing::debug!(%dragged, %column_id, from = current.index, to = index, "live reorder");
                Ok(HoverOutcome::Reordered {
                    column_id,
                    from: current.index,
                    to: index,
                })
            }
            DropTarget::Column { column_id } if column_id == current.column_id => {
                drag.pending = Some(PendingDrop {
                    column_id,
                    index: current.index,
                });
                Ok(HoverOutcome::Unchanged)
            }
            DropTarget::Task {
                column_id, index, ..
            } => {
                let pending = PendingDrop { column_id, index };
                drag.pending = Some(pending);
                Ok(HoverOutcome::Pending(pending))
            }
            DropTarget::Column { column_id } => {
                let index = board.column(column_id).map_or(0, |entry| entry.task_count());
                let pending = PendingDrop { column_id, index };
                drag.pending = Some(pending);
                Ok(HoverOutcome::Pending(pending))
            }
        }
    }

    /// Ends the drag with the pointer released over `over`.
    ///
    /// The session is idle afterwards whatever the outcome. Releasing over
    /// nothing is a cancel and an unresolvable target is invalid; both apply
    /// the cancel policy and neither asks for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] only when reverting the origin column
    /// fails because it has disappeared from the model.
    pub fn finish(
        &mut self,
        board: &mut OrderedBoard,
        over: Option<DroppableId>,
    ) -> Result<DragEnd, BoardDomainError> {
        let Some(drag) = self.active.take() else {
            return Ok(DragEnd::NotActive);
        };
        let task_id = drag.task.id();
        let Some(over_id) = over else {
            self.apply_cancel_policy(board, &drag)?;
            tracing::debug!(%task_id, "drag released over nothing");
            return Ok(DragEnd::Cancelled { task_id });
        };
        let Some(target) = board.resolve(over_id) else {
            self.apply_cancel_policy(board, &drag)?;
            tracing::warn!(%task_id, over = %over_id, "drag released over an unknown target");
            return Ok(DragEnd::Invalid { task_id });
        };
        Ok(DragEnd::Dropped(CompletedDrag {
            task_id,
            origin: drag.origin,
            target,
            already_tracked: drag.last_over == Some(over_id),
        }))
    }

    /// Abandons the active drag, applying the cancel policy.
    ///
    /// # Errors
    ///
    /// See [`DragSession::finish`].
    pub fn cancel(&mut self, board: &mut OrderedBoard) -> Result<DragEnd, BoardDomainError> {
        self.finish(board, None)
    }

    fn apply_cancel_policy(
        &self,
        board: &mut OrderedBoard,
        drag: &ActiveDrag,
    ) -> Result<(), BoardDomainError> {
        match self.cancel_policy {
            CancelPolicy::KeepHoverOrder => Ok(()),
            CancelPolicy::RevertToOrigin => {
                board.restore_column_order(drag.origin.column_id, &drag.origin_order)
            }
        }
    }
}
