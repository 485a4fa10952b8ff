use chrono::NaiveDate;

use crate::models::{Category, Status, TaskRecord};

/// Per-row emphasis signal for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowDecoration {
    /// Category colour bucket; `None` for unrecognized categories.
    pub category: Option<Category>,
    pub completed: bool,
    /// The task ended before the session date.
    pub past: bool,
}

pub fn decorate(task: &TaskRecord, session_date: NaiveDate) -> RowDecoration {
    RowDecoration {
        category: task.category.is_recognized().then(|| task.category.clone()),
        completed: task.status.is_done(),
        past: task.end_date < session_date,
    }
}

pub fn status_badge(status: &Status) -> &'static str {
    match status {
        Status::Done => "🟢",
        Status::InProgress => "🟡",
        Status::NotStarted => "⚪",
        Status::Unrecognized(_) => "❔",
    }
}
