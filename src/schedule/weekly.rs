use chrono::{Datelike, Duration, NaiveDate};

use super::decorate::decorate;
use super::normalize::realign;
use super::table::{Granularity, Marker, ScheduleRow, ScheduleTable, TimeColumn};
use crate::config::ScheduleConfig;
use crate::models::{Status, TaskRecord};

/// 1-based project week containing `date`. Dates before the epoch give
/// zero or negative weeks and never land in a column.
pub fn week_of_date(date: NaiveDate, epoch: NaiveDate) -> i64 {
    (date - epoch).num_days().div_euclid(7) + 1
}

/// Header for the week starting on `first_day`, e.g. `12月1週目`.
pub fn week_label(first_day: NaiveDate) -> String {
    let week_of_month = (first_day.day() - 1) / 7 + 1;
    format!("{}月{}週目", first_day.month(), week_of_month)
}

fn week_marker(status: &Status) -> Marker {
    match status {
        Status::Done => Marker::Done,
        Status::NotStarted | Status::InProgress | Status::Unrecognized(_) => Marker::Span,
    }
}

/// Build the week-by-week grid.
///
/// Rows sort on `(start_week, phase)` only; ties keep input order. The grid
/// has exactly as many columns as the latest end week, with no minimum.
pub fn build_weekly_schedule(
    tasks: &[TaskRecord],
    config: &ScheduleConfig,
    session_date: NaiveDate,
) -> ScheduleTable {
    if tasks.is_empty() {
        return ScheduleTable::empty(Granularity::Weekly);
    }

    let aligned: Vec<(TaskRecord, i64, i64)> = tasks
        .iter()
        .cloned()
        .map(|mut t| {
            realign(&mut t, config);
            let start_week = week_of_date(t.start_date, config.project_epoch);
            let end_week = week_of_date(t.end_date, config.project_epoch);
            (t, start_week, end_week)
        })
        .collect();

    let max_week = aligned.iter().map(|(_, _, end)| *end).max().unwrap_or(0).max(0);
    let columns: Vec<TimeColumn> = (0..max_week)
        .map(|w| {
            let first_day = config
                .project_epoch
                .checked_add_signed(Duration::days(w * 7))
                .unwrap_or(NaiveDate::MAX);
            TimeColumn {
                label: week_label(first_day),
                first_day,
                past: false,
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..aligned.len()).collect();
    order.sort_by(|&a, &b| {
        let (ta, wa, _) = &aligned[a];
        let (tb, wb, _) = &aligned[b];
        wa.cmp(wb).then_with(|| ta.phase.as_str().cmp(tb.phase.as_str()))
    });

    let rows = order
        .into_iter()
        .enumerate()
        .map(|(pos, idx)| {
            let (task, start_week, end_week) = &aligned[idx];
            let marker = week_marker(&task.status);
            let cells = (1..=max_week)
                .map(|w| {
                    if (*start_week..=*end_week).contains(&w) {
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
        granularity: Granularity::Weekly,
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use crate::schedule::normalize::normalize_record;

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

    #[test]
    fn test_week_index() {
        let epoch = cfg().project_epoch;
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        assert_eq!(week_of_date(d("2025-11-25"), epoch), 1);
        assert_eq!(week_of_date(d("2025-12-01"), epoch), 1);
        assert_eq!(week_of_date(d("2025-12-02"), epoch), 2);
        assert_eq!(week_of_date(d("2025-11-24"), epoch), 0);
    }

    #[test]
    fn test_weeks_past_day_cap_use_real_dates() {
        // Day 180 is 2026-05-23; this task sits entirely after it.
        let t = task("Phase2-Build", "Fit-out", "2026-06-01", "2026-07-01", "in-progress");
        let table = build_weekly_schedule(&[t], &cfg(), today());
        assert_eq!(table.columns.len(), 32);
        let marked: Vec<usize> = table.rows[0]
            .cells
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_marked())
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(marked, (27..=32).collect::<Vec<_>>());
        assert_eq!(table.columns[26].first_day, NaiveDate::from_ymd_opt(2026, 5, 26).unwrap());
    }

    #[test]
    fn test_two_week_task_marks_two_columns() {
        // Days 1..=14 cover exactly weeks 1 and 2.
        let t = task("Phase1-Design", "Layout", "2025-11-25", "2025-12-08", "in-progress");
        let table = build_weekly_schedule(&[t], &cfg(), today());
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.rows[0].cells, vec![Marker::Span, Marker::Span]);
    }

    #[test]
    fn test_single_day_is_span_not_point() {
        let t = task("Phase1-Design", "Call", "2025-12-03", "2025-12-03", "not-started");
        let table = build_weekly_schedule(&[t], &cfg(), today());
        assert_eq!(table.rows[0].cells, vec![Marker::Empty, Marker::Span]);
    }

    #[test]
    fn test_done_marker() {
        let t = task("Phase1-Design", "Call", "2025-11-25", "2025-11-26", "done");
        let table = build_weekly_schedule(&[t], &cfg(), today());
        assert_eq!(table.rows[0].cells, vec![Marker::Done]);
    }

    #[test]
    fn test_no_window_floor() {
        let t = task("Phase1-Design", "Call", "2025-11-25", "2025-11-25", "not-started");
        let table = build_weekly_schedule(&[t], &cfg(), today());
        assert_eq!(table.columns.len(), 1);
    }

    #[test]
    fn test_labels_use_month_and_week_of_month() {
        let t = task("Phase1-Design", "Long", "2025-11-25", "2025-12-20", "not-started");
        let table = build_weekly_schedule(&[t], &cfg(), today());
        let labels: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["11月4週目", "12月1週目", "12月2週目", "12月3週目"]);
    }

    #[test]
    fn test_sort_ignores_title() {
        let tasks = vec![
            task("Phase1-Design", "Zulu", "2025-11-26", "2025-11-26", "not-started"),
            task("Phase1-Design", "Alpha", "2025-11-27", "2025-11-27", "not-started"),
            task("Phase2-Build", "Bravo", "2025-11-25", "2025-11-25", "not-started"),
            task("Phase1-Design", "Later", "2025-12-10", "2025-12-10", "not-started"),
        ];
        let table = build_weekly_schedule(&tasks, &cfg(), today());
        let titles: Vec<&str> = table.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Zulu", "Alpha", "Bravo", "Later"]);
        let numbers: Vec<usize> = table.rows.iter().map(|r| r.sequence_number).collect();
        assert_eq!(numbers, [1, 2, 3, 4]);
    }
}
