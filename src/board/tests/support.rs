//! Builders shared by the board unit tests.

use crate::board::domain::{
    BoardId, Column, ColumnId, ColumnWithTasks, OrderedBoard, Priority, Task, TaskDraft, TaskId,
};
use mockable::DefaultClock;

/// A task to seed into a test column.
#[derive(Debug, Clone, Copy)]
pub(super) struct Seed {
    pub title: &'static str,
    pub priority: Priority,
}

impl Seed {
    pub(super) const fn titled(title: &'static str) -> Self {
        Self {
            title,
            priority: Priority::Medium,
        }
    }

    pub(super) const fn with_priority(title: &'static str, priority: Priority) -> Self {
        Self { title, priority }
    }
}

pub(super) fn column(board_id: BoardId, title: &str, position: i64) -> Column {
    Column::new(board_id, title, position, &DefaultClock).expect("valid column")
}

pub(super) fn task(column_id: ColumnId, seed: Seed, position: i64) -> Task {
    let draft = TaskDraft::new(seed.title)
        .expect("valid task draft")
        .with_priority(seed.priority);
    Task::new(column_id, draft, position, &DefaultClock)
}

pub(super) fn column_with(board_id: BoardId, title: &str, position: i64, seeds: &[Seed]) -> ColumnWithTasks {
    let column = column(board_id, title, position);
    let tasks = seeds
        .iter()
        .zip(0_i64..)
        .map(|(seed, index)| task(column.id(), *seed, index))
        .collect();
    ColumnWithTasks::new(column, tasks)
}

/// Builds a board from `(column title, task titles)` pairs in display order.
pub(super) fn board_of(layout: &[(&str, &[&'static str])]) -> OrderedBoard {
    let board_id = BoardId::new();
    let columns = layout
        .iter()
        .zip(0_i64..)
        .map(|((title, tasks), position)| {
            let seeds: Vec<Seed> = tasks.iter().copied().map(Seed::titled).collect();
            column_with(board_id, title, position, &seeds)
        })
        .collect();
    OrderedBoard::from_columns(columns).expect("valid board layout")
}

pub(super) fn column_id(board: &OrderedBoard, title: &str) -> ColumnId {
    board
        .columns()
        .iter()
        .find(|entry| entry.column().title() == title)
        .map(ColumnWithTasks::id)
        .expect("column present")
}

pub(super) fn task_id(board: &OrderedBoard, title: &str) -> TaskId {
    board
        .columns()
        .iter()
        .flat_map(ColumnWithTasks::tasks)
        .find(|task| task.title() == title)
        .map(Task::id)
        .expect("task present")
}

/// Task titles of a column in display order.
pub(super) fn titles(board: &OrderedBoard, column_title: &str) -> Vec<String> {
    board
        .column(column_id(board, column_title))
        .map(|entry| entry.tasks().iter().map(|task| task.title().to_owned()).collect())
        .unwrap_or_default()
}

/// Stored positions of a column in display order.
pub(super) fn positions(board: &OrderedBoard, column_title: &str) -> Vec<i64> {
    board
        .column(column_id(board, column_title))
        .map(|entry| entry.tasks().iter().map(Task::position).collect())
        .unwrap_or_default()
}
