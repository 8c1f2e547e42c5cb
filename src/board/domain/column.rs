//! Column entity: an ordered lane of tasks within a board.

use super::{BoardDomainError, BoardId, ColumnId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A column within a board.
///
/// Positions are unique within a board and strictly increasing in display
/// order. They need not be contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    board_id: BoardId,
    title: String,
    position: i64,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Parent board.
    pub board_id: BoardId,
    /// Persisted title.
    pub title: String,
    /// Persisted ordinal position.
    pub position: i64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Column {
    /// Creates a new column at `position` on `board_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] when the title is blank.
    pub fn new(
        board_id: BoardId,
        title: &str,
        position: i64,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id: ColumnId::new(),
            board_id,
            title: validate_title(title)?,
            position,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            title: data.title,
            position: data.position,
            created_at: data.created_at,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the parent board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the column title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the ordinal position within the board.
    #[must_use]
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the column title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] when the title is blank.
    pub fn rename(&mut self, title: &str) -> Result<(), BoardDomainError> {
        self.title = validate_title(title)?;
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<String, BoardDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyColumnTitle);
    }
    Ok(trimmed.to_owned())
}
