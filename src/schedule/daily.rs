use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};

use super::decorate::decorate;
use super::normalize::realign;
use super::table::{Granularity, Marker, ScheduleRow, ScheduleTable, TimeColumn};
use crate::config::ScheduleConfig;
use crate::models::{Status, TaskRecord};

/// Display order shared by the daily grid and the list view.
pub fn display_order(a: &TaskRecord, b: &TaskRecord) -> Ordering {
    a.start_date
        .cmp(&b.start_date)
        .then_with(|| a.phase.as_str().cmp(b.phase.as_str()))
        .then_with(|| a.title.cmp(&b.title))
}

fn day_marker(task: &TaskRecord) -> Marker {
    match task.status {
        Status::Done => Marker::Done,
        Status::NotStarted | Status::InProgress | Status::Unrecognized(_) => {
            if task.is_single_day() {
                Marker::Point
            } else {
                Marker::Span
            }
        }
    }
}

/// Build the day-by-day grid.
///
/// The window starts at the epoch and runs to whichever is later: the
/// configured `base_end` or the last (clipped) end day of any task. Rows are
/// numbered in `(start_date, phase, title)` order and `original_index` is the
/// task's position in `tasks`.
pub fn build_daily_schedule(
    tasks: &[TaskRecord],
    config: &ScheduleConfig,
    session_date: NaiveDate,
) -> ScheduleTable {
    if tasks.is_empty() {
        return ScheduleTable::empty(Granularity::Daily);
    }

    let aligned: Vec<TaskRecord> = tasks
        .iter()
        .cloned()
        .map(|mut t| {
            realign(&mut t, config);
            t
        })
        .collect();

    let max_end_day = aligned
        .iter()
        .map(|t| t.end_day)
        .max()
        .unwrap_or(1)
        .min(config.max_schedule_days);
    let window_end = config.base_end.max(config.date_of(max_end_day));
    let num_days = (window_end - config.project_epoch).num_days() + 1;

    let columns: Vec<TimeColumn> = (0..num_days)
        .map(|i| {
            let day = config.project_epoch + Duration::days(i);
            TimeColumn {
                label: day.format("%m/%d").to_string(),
                first_day: day,
                past: day < session_date,
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..aligned.len()).collect();
    order.sort_by(|&a, &b| display_order(&aligned[a], &aligned[b]));

    let rows = order
        .into_iter()
        .enumerate()
        .map(|(pos, idx)| {
            let task = &aligned[idx];
            let marker = day_marker(task);
            let cells = (1..=columns.len() as u32)
                .map(|day| {
                    if (task.start_day..=task.end_day).contains(&day) {
                        marker
                    } else {
                        Marker::Empty
                    }
                })
                .collect();
            ScheduleRow::new(pos + 1, idx, task, cells, decorate(task, session_date))
        })
        .collect();

    ScheduleTable {
        granularity: Granularity::Daily,
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use crate::schedule::normalize::{normalize_record, normalize_records};

    fn cfg() -> ScheduleConfig {
        ScheduleConfig::default()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    fn task(phase: &str, title: &str, start: &str, end: &str, status: &str) -> TaskRecord {
        let raw = RawRecord::new()
            .with(COL_PHASE, phase)
            .with(COL_TITLE, title)
            .with(COL_START_DATE, start)
            .with(COL_END_DATE, end)
            .with(COL_STATUS, status);
        normalize_record(&raw, &cfg())
    }

    fn marked(row: &ScheduleRow) -> Vec<(usize, Marker)> {
        row.cells
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_marked())
            .map(|(i, m)| (i, *m))
            .collect()
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = build_daily_schedule(&[], &cfg(), today());
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
        assert!(table.headers().is_empty());
    }

    #[test]
    fn test_single_day_task_gets_point_marker() {
        let t = task("Phase1-Design", "Kickoff", "2025-11-25", "2025-11-25", "not-started");
        let table = build_daily_schedule(&[t], &cfg(), today());
        assert_eq!(marked(&table.rows[0]), vec![(0, Marker::Point)]);
    }

    #[test]
    fn test_multi_day_task_gets_span_markers() {
        let t = task("Phase1-Design", "Survey", "2025-11-25", "2025-11-27", "in-progress");
        let table = build_daily_schedule(&[t], &cfg(), today());
        assert_eq!(
            marked(&table.rows[0]),
            vec![(0, Marker::Span), (1, Marker::Span), (2, Marker::Span)]
        );
    }

    #[test]
    fn test_inverted_range_marks_one_day() {
        let t = task("Phase2-Build", "Fixtures", "2025-12-05", "2025-12-01", "not-started");
        let table = build_daily_schedule(&[t], &cfg(), today());
        let row = &table.rows[0];
        assert_eq!(row.end_date, NaiveDate::from_ymd_opt(2025, 12, 5).unwrap());
        assert_eq!(marked(row), vec![(10, Marker::Point)]);
    }

    #[test]
    fn test_done_uses_done_marker_everywhere() {
        let tasks = vec![
            task("Phase1-Design", "A", "2025-11-25", "2025-11-25", "done"),
            task("Phase1-Design", "B", "2025-11-26", "2025-11-30", "完了"),
        ];
        let table = build_daily_schedule(&tasks, &cfg(), today());
        for row in &table.rows {
            assert!(row.marked_count() > 0);
            assert!(row.cells.iter().filter(|m| m.is_marked()).all(|m| *m == Marker::Done));
            assert!(row.decoration.completed);
        }
    }

    #[test]
    fn test_marked_count_matches_offsets() {
        let tasks = vec![
            task("Phase1-Design", "A", "2025-11-25", "2025-12-10", "in-progress"),
            task("Phase3-Implement", "B", "2026-01-01", "2026-01-01", "not-started"),
            task("Phase4-Finish", "C", "2026-05-01", "2027-01-01", "not-started"),
        ];
        let table = build_daily_schedule(&tasks, &cfg(), today());
        for row in &table.rows {
            let t = &tasks[row.original_index];
            assert_eq!(row.marked_count() as u32, t.end_day - t.start_day + 1);
        }
    }

    #[test]
    fn test_rows_ordered_and_numbered() {
        let tasks = vec![
            task("Phase2-Build", "Zeta", "2025-12-01", "2025-12-02", "not-started"),
            task("Phase1-Design", "Beta", "2025-12-01", "2025-12-01", "not-started"),
            task("Phase1-Design", "Alpha", "2025-12-01", "2025-12-03", "not-started"),
            task("Phase4-Finish", "Early", "2025-11-26", "2025-11-26", "not-started"),
        ];
        let table = build_daily_schedule(&tasks, &cfg(), today());
        let titles: Vec<&str> = table.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Early", "Alpha", "Beta", "Zeta"]);
        let numbers: Vec<usize> = table.rows.iter().map(|r| r.sequence_number).collect();
        assert_eq!(numbers, [1, 2, 3, 4]);
        assert_eq!(table.rows[0].original_index, 3);
    }

    #[test]
    fn test_window_floor_reaches_base_end() {
        let t = task("Phase1-Design", "A", "2025-11-25", "2025-11-26", "not-started");
        let table = build_daily_schedule(&[t], &cfg(), today());
        let last = table.columns.last().unwrap();
        assert_eq!(last.first_day, cfg().base_end);
        assert_eq!(last.label, "03/31");
        assert_eq!(table.columns[0].label, "11/25");
        assert_eq!(table.columns.len(), 127);
    }

    #[test]
    fn test_window_stretches_past_base_end() {
        let t = task("Phase4-Finish", "Grand opening", "2026-04-10", "2026-04-20", "not-started");
        let table = build_daily_schedule(&[t], &cfg(), today());
        let expected = (NaiveDate::from_ymd_opt(2026, 4, 20).unwrap() - cfg().project_epoch).num_days() + 1;
        assert_eq!(table.columns.len() as i64, expected);
    }

    #[test]
    fn test_window_capped_at_max_days() {
        let raw = RawRecord::new().with(COL_START_DAY, 500).with(COL_END_DAY, 900);
        let t = normalize_record(&raw, &cfg());
        assert_eq!(t.start_day, 180);
        let table = build_daily_schedule(&[t], &cfg(), today());
        assert_eq!(table.columns.len(), 180);
        assert_eq!(marked(&table.rows[0]), vec![(179, Marker::Point)]);
    }

    #[test]
    fn test_builder_is_idempotent_over_round_trip() {
        let tasks = vec![
            task("Phase1-Design", "A", "2025-11-25", "2025-12-10", "in-progress"),
            task("Phase2-Build", "B", "2025-12-05", "2025-12-01", "done"),
        ];
        let first = build_daily_schedule(&tasks, &cfg(), today());
        let raws: Vec<RawRecord> = tasks.iter().map(TaskRecord::to_raw).collect();
        let reloaded = normalize_records(&raws, &cfg());
        let second = build_daily_schedule(&reloaded, &cfg(), today());
        assert_eq!(first, second);
    }

    #[test]
    fn test_past_columns_and_rows() {
        let tasks = vec![
            task("Phase1-Design", "Old", "2025-11-25", "2025-11-28", "done"),
            task("Phase1-Design", "Now", "2025-11-30", "2025-12-02", "in-progress"),
        ];
        let table = build_daily_schedule(&tasks, &cfg(), today());
        assert_eq!(table.columns.iter().filter(|c| c.past).count(), 6);
        assert!(table.rows[0].decoration.past);
        assert!(!table.rows[1].decoration.past);
    }
}
