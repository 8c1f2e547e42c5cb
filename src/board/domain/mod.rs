//! Domain model for boards, columns, tasks and their ordering.
//!
//! Everything here is synchronous and free of I/O: the ordered model, the
//! filter engine, the drag session state machine and drop reconciliation.
//! Storage and identity live behind the ports in [`crate::board::ports`].

mod board;
mod column;
mod drag;
mod error;
mod filter;
mod ids;
mod ordered;
mod reconcile;
mod task;

pub use board::{Board, BoardUpdate, PersistedBoardData};
pub use column::{Column, PersistedColumnData};
pub use drag::{
    CancelPolicy, CompletedDrag, DragEnd, DragSession, DropTarget, DroppableId, HoverOutcome,
    PendingDrop,
};
pub use error::{BoardDomainError, ParsePriorityError};
pub use filter::{BoardListFilter, FilterCriteria, apply_filters};
pub use ids::{BoardId, ColumnId, TaskId, UserId};
pub use ordered::{ColumnWithTasks, OrderedBoard, TaskLocation};
pub use reconcile::{DropDecision, MovePlan, plan_drop};
pub use task::{PersistedTaskData, Priority, Task, TaskDraft};

pub(crate) use ordered::{position_for, validate_membership};
