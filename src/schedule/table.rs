use chrono::NaiveDate;

use super::decorate::RowDecoration;
use crate::models::{Category, Phase, Status, TaskRecord};

/// Leading descriptive columns shared by both granularities.
pub const FIXED_COLUMNS: [&str; 8] = [
    "No.", "Phase", "Category", "Title", "Owner", "Status", "StartDate", "EndDate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Daily,
    Weekly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Empty,
    /// Single-day task.
    Point,
    Span,
    Done,
}

impl Marker {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Point => "●",
            Self::Span => "■",
            Self::Done => "✔",
        }
    }

    pub fn is_marked(&self) -> bool {
        !matches!(self, Self::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeColumn {
    pub label: String,
    pub first_day: NaiveDate,
    /// Column lies before the session date (daily grid only).
    pub past: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub sequence_number: usize,
    /// Position of the task in the collection the grid was built from.
    pub original_index: usize,
    pub phase: Phase,
    pub category: Category,
    pub title: String,
    pub owner: String,
    pub status: Status,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cells: Vec<Marker>,
    pub decoration: RowDecoration,
}

impl ScheduleRow {
    pub(crate) fn new(
        sequence_number: usize,
        original_index: usize,
        task: &TaskRecord,
        cells: Vec<Marker>,
        decoration: RowDecoration,
    ) -> Self {
        Self {
            sequence_number,
            original_index,
            phase: task.phase.clone(),
            category: task.category.clone(),
            title: task.title.clone(),
            owner: task.owner.clone(),
            status: task.status.clone(),
            start_date: task.start_date,
            end_date: task.end_date,
            cells,
            decoration,
        }
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|m| m.is_marked()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTable {
    pub granularity: Granularity,
    pub columns: Vec<TimeColumn>,
    pub rows: Vec<ScheduleRow>,
}

impl ScheduleTable {
    pub fn empty(granularity: Granularity) -> Self {
        Self {
            granularity,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every column header: the fixed ones, then one per day or week.
    pub fn headers(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        FIXED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.columns.iter().map(|c| c.label.clone()))
            .collect()
    }
}
