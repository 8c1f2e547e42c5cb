//! Declarative, read-only filters over the ordered board model.
//!
//! Filtering never reorders or mutates the model: it returns copies of the
//! columns with non-matching tasks left out, so badges show filtered counts
//! while stored positions stay intact.

use super::{Board, ColumnWithTasks, Priority, Task};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Task filter criteria. Every non-empty criterion must match.
///
/// # Examples
///
/// ```
/// use taskboard::board::domain::{FilterCriteria, Priority};
///
/// let criteria = FilterCriteria::default().with_priority(Priority::High);
/// assert!(!criteria.is_empty());
/// assert!(FilterCriteria::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    priorities: HashSet<Priority>,
    due_date: Option<NaiveDate>,
    search: String,
}

impl FilterCriteria {
    /// Adds a priority to the accepted set.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priorities.insert(priority);
        self
    }

    /// Adds several priorities to the accepted set.
    #[must_use]
    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priorities.extend(priorities);
        self
    }

    /// Restricts tasks to an exact due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Restricts tasks to titles containing `search`, ignoring case.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_lowercase();
        self
    }

    /// Returns the accepted priorities; empty means any.
    #[must_use]
    pub const fn priorities(&self) -> &HashSet<Priority> {
        &self.priorities
    }

    /// Returns the required due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the normalised search text; empty means any.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns `true` when no criterion restricts anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of criteria currently restricting the view.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            !self.priorities.is_empty(),
            self.due_date.is_some(),
            !self.search.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Returns `true` when `task` satisfies every non-empty criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let priority_ok = self.priorities.is_empty() || self.priorities.contains(&task.priority());
        let due_ok = self
            .due_date
            .is_none_or(|wanted| task.due_date() == Some(wanted));
        let search_ok =
            self.search.is_empty() || task.title().to_lowercase().contains(&self.search);
        priority_ok && due_ok && search_ok
    }
}

/// Returns the filtered view of `columns`.
///
/// Every column is kept; only its task sequence is filtered, preserving
/// relative order.
#[must_use]
pub fn apply_filters(columns: &[ColumnWithTasks], criteria: &FilterCriteria) -> Vec<ColumnWithTasks> {
    columns
        .iter()
        .map(|entry| {
            let mut filtered = entry.clone();
            if !criteria.is_empty() {
                filtered.retain_tasks(|task| criteria.matches(task));
            }
            filtered
        })
        .collect()
}

/// Dashboard filter over a user's boards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardListFilter {
    search: String,
    created_from: Option<NaiveDate>,
    created_to: Option<NaiveDate>,
}

impl BoardListFilter {
    /// Restricts boards to titles containing `search`, ignoring case.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_lowercase();
        self
    }

    /// Keeps boards created on or after `date`.
    #[must_use]
    pub const fn created_from(mut self, date: NaiveDate) -> Self {
        self.created_from = Some(date);
        self
    }

    /// Keeps boards created on or before `date`.
    #[must_use]
    pub const fn created_to(mut self, date: NaiveDate) -> Self {
        self.created_to = Some(date);
        self
    }

    /// Returns `true` when `board` passes the filter.
    #[must_use]
    pub fn matches(&self, board: &Board) -> bool {
        let created = board.created_at().date_naive();
        let search_ok =
            self.search.is_empty() || board.title().to_lowercase().contains(&self.search);
        let from_ok = self.created_from.is_none_or(|from| created >= from);
        let to_ok = self.created_to.is_none_or(|to| created <= to);
        search_ok && from_ok && to_ok
    }

    /// Returns the boards passing the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, boards: &'a [Board]) -> Vec<&'a Board> {
        boards.iter().filter(|board| self.matches(board)).collect()
    }
}
