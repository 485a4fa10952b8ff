use std::collections::BTreeSet;

use super::daily::display_order;
use crate::models::{Phase, Status, TaskRecord};

/// Separators people use when several owners share a task.
const OWNER_SEPARATORS: [char; 5] = [',', '、', '，', '/', '／'];

/// Row-selection criteria. An empty list places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TaskFilter {
    pub phases: Vec<Phase>,
    pub owners: Vec<String>,
    pub statuses: Vec<Status>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty() && self.owners.is_empty() && self.statuses.is_empty()
    }

    pub fn matches(&self, task: &TaskRecord) -> bool {
        (self.phases.is_empty() || self.phases.contains(&task.phase))
            && (self.statuses.is_empty() || self.statuses.contains(&task.status))
            && (self.owners.is_empty()
                || self.owners.iter().any(|name| task.owner.contains(name.as_str())))
    }
}

/// A task as it appears in one materialized view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRow {
    pub sequence_number: usize,
    /// Index of the task in the authoritative collection.
    pub original_index: usize,
}

/// Split one owner cell into individual names.
pub fn split_owner_names(owner: &str) -> Vec<String> {
    owner
        .split(|c| OWNER_SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct owner names across all tasks, sorted.
pub fn owner_names(tasks: &[TaskRecord]) -> Vec<String> {
    tasks
        .iter()
        .flat_map(|t| split_owner_names(&t.owner))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Indices of matching tasks, in storage order.
pub fn filter_indices(tasks: &[TaskRecord], filter: &TaskFilter) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| filter.matches(t))
        .map(|(i, _)| i)
        .collect()
}

/// Number the given ordering of `indices` from 1.
pub fn number_view(indices: &[usize]) -> Vec<ViewRow> {
    indices
        .iter()
        .enumerate()
        .map(|(pos, &original_index)| ViewRow {
            sequence_number: pos + 1,
            original_index,
        })
        .collect()
}

/// The list view: filter, sort by `(start_date, phase, title)`, number.
pub fn list_view(tasks: &[TaskRecord], filter: &TaskFilter) -> Vec<ViewRow> {
    let mut indices = filter_indices(tasks, filter);
    indices.sort_by(|&a, &b| display_order(&tasks[a], &tasks[b]));
    number_view(&indices)
}
