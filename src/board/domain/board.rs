//! Board aggregate: the top-level container owned by a single user.

use super::{BoardDomainError, BoardId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Board aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    owner: UserId,
    title: String,
    color: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted owner reference.
    pub owner: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted colour tag.
    pub color: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Title and colour changes applied to a board.
///
/// Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardUpdate {
    title: Option<String>,
    color: Option<String>,
}

impl BoardUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the new colour tag.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Returns the requested title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the requested colour tag, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns `true` when the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.color.is_none()
    }
}

impl Board {
    /// Colour tag assigned when the caller does not choose one.
    pub const DEFAULT_COLOR: &'static str = "bg-blue-500";

    /// Creates a new board owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyBoardTitle`] or
    /// [`BoardDomainError::EmptyBoardColor`] when either value is blank.
    pub fn new(
        owner: UserId,
        title: &str,
        color: &str,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: BoardId::new(),
            owner,
            title: validate_title(title)?,
            color: validate_color(color)?,
            description: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            color: data.color,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Sets the optional description; blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(&description.into());
        self
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns the board title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the colour tag.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when `user` owns this board.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner == *user
    }

    /// Applies a title and colour update.
    ///
    /// Both values are validated before anything changes, so a rejected
    /// update leaves the board untouched.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyBoardTitle`] or
    /// [`BoardDomainError::EmptyBoardColor`] when a supplied value is blank.
    pub fn apply_update(
        &mut self,
        update: &BoardUpdate,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        let title = update.title().map(validate_title).transpose()?;
        let color = update.color().map(validate_color).transpose()?;
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_color) = color {
            self.color = new_color;
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<String, BoardDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyBoardTitle);
    }
    Ok(trimmed.to_owned())
}

fn validate_color(color: &str) -> Result<String, BoardDomainError> {
    let trimmed = color.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyBoardColor);
    }
    Ok(trimmed.to_owned())
}

/// Trims optional free text, mapping blank input to `None`.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
