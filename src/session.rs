//! The caller-owned working copy of the task collection.
//!
//! A [`Session`] is the only mutable source of truth during a run. Every
//! add/edit/delete is applied to a copy, written through to the store as a
//! full overwrite, and only then becomes the session's state.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::ScheduleConfig;
use crate::db::TaskStore;
use crate::error::TaskboardError;
use crate::models::{Category, Phase, RawRecord, Status, TaskRecord};
use crate::schedule::view::filter_indices;
use crate::schedule::{
    build_daily_schedule, build_weekly_schedule, list_view, normalize_records, realign,
    Granularity, ScheduleTable, TaskFilter, ViewRow,
};

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub phase: Phase,
    pub category: Category,
    pub owner: String,
    pub status: Status,
    pub detail: Option<String>,
    /// Defaults to the session date.
    pub start_date: Option<NaiveDate>,
    /// Defaults to the start date.
    pub end_date: Option<NaiveDate>,
}

/// Fields to change on an existing task. A date wins over the matching day
/// offset when both are given.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub phase: Option<Phase>,
    pub category: Option<Category>,
    pub owner: Option<String>,
    pub status: Option<Status>,
    pub detail: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_day: Option<u32>,
    pub end_day: Option<u32>,
}

struct CachedSchedule {
    key: u64,
    table: ScheduleTable,
}

pub struct Session<S: TaskStore> {
    store: S,
    config: ScheduleConfig,
    session_date: NaiveDate,
    tasks: Vec<TaskRecord>,
    cache: Option<CachedSchedule>,
    cache_hits: u64,
}

fn required_title(title: &str) -> Result<String, TaskboardError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskboardError::validation("Task title must not be empty"));
    }
    Ok(title.to_string())
}

fn non_empty(text: String) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

impl<S: TaskStore> Session<S> {
    /// Load the full collection from the store and normalize it.
    pub fn open(store: S, config: ScheduleConfig, session_date: NaiveDate) -> Result<Self, TaskboardError> {
        let raws = store.load()?;
        let tasks = normalize_records(&raws, &config);
        debug!(tasks = tasks.len(), %session_date, "session opened");
        Ok(Self {
            store,
            config,
            session_date,
            tasks,
            cache: None,
            cache_hits: 0,
        })
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn session_date(&self) -> NaiveDate {
        self.session_date
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    pub fn list_view(&self, filter: &TaskFilter) -> Vec<ViewRow> {
        list_view(&self.tasks, filter)
    }

    /// Map a sequence number in the filtered list view back to a storage index.
    pub fn resolve_sequence(&self, filter: &TaskFilter, sequence_number: usize) -> Result<usize, TaskboardError> {
        self.list_view(filter)
            .into_iter()
            .find(|row| row.sequence_number == sequence_number)
            .map(|row| row.original_index)
            .ok_or_else(|| TaskboardError::task_not_found(&format!("No. {sequence_number}")))
    }

    /// Append a task and write through. Returns its storage index.
    pub fn add_task(&mut self, new: NewTask) -> Result<usize, TaskboardError> {
        let title = required_title(&new.title)?;
        let start_date = new.start_date.unwrap_or(self.session_date);
        let end_date = new.end_date.unwrap_or(start_date);
        let mut task = TaskRecord {
            phase: new.phase,
            category: new.category,
            title,
            detail: new.detail.and_then(non_empty),
            owner: new.owner.trim().to_string(),
            status: new.status,
            start_date,
            end_date,
            start_day: 1,
            end_day: 1,
            extra: Vec::new(),
        };
        realign(&mut task, &self.config);

        let mut next = self.tasks.clone();
        next.push(task);
        self.commit(next)?;
        let index = self.tasks.len() - 1;
        info!(index, "task added");
        Ok(index)
    }

    /// Apply an edit to the task at `index` and write through.
    pub fn edit_task(&mut self, index: usize, edit: TaskEdit) -> Result<&TaskRecord, TaskboardError> {
        let mut task = self
            .tasks
            .get(index)
            .cloned()
            .ok_or_else(|| TaskboardError::task_not_found(&format!("index {index}")))?;

        if let Some(title) = edit.title {
            task.title = required_title(&title)?;
        }
        if let Some(phase) = edit.phase {
            task.phase = phase;
        }
        if let Some(category) = edit.category {
            task.category = category;
        }
        if let Some(owner) = edit.owner {
            task.owner = owner.trim().to_string();
        }
        if let Some(status) = edit.status {
            task.status = status;
        }
        if let Some(detail) = edit.detail {
            task.detail = non_empty(detail);
        }

        let config = &self.config;
        match (edit.start_date, edit.start_day) {
            (Some(date), _) => task.start_date = date,
            (None, Some(day)) => task.start_date = config.date_of(config.clip_day(i64::from(day))),
            (None, None) => {}
        }
        match (edit.end_date, edit.end_day) {
            (Some(date), _) => task.end_date = date,
            (None, Some(day)) => task.end_date = config.date_of(config.clip_day(i64::from(day))),
            (None, None) => {}
        }
        realign(&mut task, config);

        let mut next = self.tasks.clone();
        next[index] = task;
        self.commit(next)?;
        info!(index, "task edited");
        Ok(&self.tasks[index])
    }

    /// Remove the task at `index` and write through. No undo.
    pub fn delete_task(&mut self, index: usize) -> Result<TaskRecord, TaskboardError> {
        if index >= self.tasks.len() {
            return Err(TaskboardError::task_not_found(&format!("index {index}")));
        }
        let mut next = self.tasks.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        info!(index, "task deleted");
        Ok(removed)
    }

    /// Replace the whole collection, e.g. from an import.
    pub fn replace_all(&mut self, raws: &[RawRecord]) -> Result<usize, TaskboardError> {
        let next = normalize_records(raws, &self.config);
        self.commit(next)?;
        info!(tasks = self.tasks.len(), "collection replaced");
        Ok(self.tasks.len())
    }

    /// The grid for the filtered tasks, or for every task when the filter
    /// matches nothing. Row `original_index` values refer to [`Self::tasks`].
    pub fn schedule(&mut self, granularity: Granularity, filter: &TaskFilter) -> ScheduleTable {
        let mut indices = filter_indices(&self.tasks, filter);
        if indices.is_empty() {
            indices = (0..self.tasks.len()).collect();
        }
        let subset: Vec<TaskRecord> = indices.iter().map(|&i| self.tasks[i].clone()).collect();

        let mut hasher = DefaultHasher::new();
        (granularity, &indices, &subset, self.session_date, &self.config).hash(&mut hasher);
        let key = hasher.finish();

        if let Some(cached) = self.cache.as_ref().filter(|c| c.key == key) {
            self.cache_hits += 1;
            return cached.table.clone();
        }

        let mut table = match granularity {
            Granularity::Daily => build_daily_schedule(&subset, &self.config, self.session_date),
            Granularity::Weekly => build_weekly_schedule(&subset, &self.config, self.session_date),
        };
        for row in &mut table.rows {
            row.original_index = indices[row.original_index];
        }
        self.cache = Some(CachedSchedule {
            key,
            table: table.clone(),
        });
        table
    }

    fn commit(&mut self, next: Vec<TaskRecord>) -> Result<(), TaskboardError> {
        let raws: Vec<RawRecord> = next.iter().map(TaskRecord::to_raw).collect();
        self.store.save(&raws)?;
        self.tasks = next;
        self.cache = None;
        Ok(())
    }
}
