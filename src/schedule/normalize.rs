//! Default resolution for raw store rows.
//!
//! Nothing here fails: an unparseable date or number degrades to the default
//! for its field, so every row still produces a displayable task.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

use crate::config::ScheduleConfig;
use crate::models::*;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// Parse a calendar date, dropping any time component.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let s = match value {
        Value::String(s) => s.trim(),
        _ => return None,
    };
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    // RFC 3339 with offset or fractional seconds: keep the date part.
    s.get(..10)
        .filter(|_| s.len() > 10 && s.as_bytes()[10] == b'T')
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Parse a whole number of days. Floats truncate toward zero.
pub fn parse_number(value: &Value) -> Option<i64> {
    let f = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if f.is_finite() {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

fn field_date(raw: &RawRecord, column: &str) -> Option<NaiveDate> {
    let value = raw.get(column)?;
    let parsed = parse_date(value);
    if parsed.is_none() {
        debug!(column, ?value, "unparseable date, using default");
    }
    parsed
}

fn field_number(raw: &RawRecord, column: &str) -> Option<i64> {
    let value = raw.get(column)?;
    let parsed = parse_number(value);
    if parsed.is_none() && raw.text(column).is_some() {
        debug!(column, ?value, "unparseable day offset, using default");
    }
    parsed
}

/// Coerce `end_date >= start_date` and recompute both offsets from the dates.
pub fn realign(task: &mut TaskRecord, config: &ScheduleConfig) {
    if task.end_date < task.start_date {
        task.end_date = task.start_date;
    }
    task.start_day = config.day_of(task.start_date);
    task.end_day = config.day_of(task.end_date);
}

/// Resolve one raw row into a consistent [`TaskRecord`].
pub fn normalize_record(raw: &RawRecord, config: &ScheduleConfig) -> TaskRecord {
    let day = field_number(raw, COL_DAY).unwrap_or(1);
    let start_day = config.clip_day(field_number(raw, COL_START_DAY).unwrap_or(day));
    let explicit_end_day = field_number(raw, COL_END_DAY).map(|d| config.clip_day(d));

    let start_date = field_date(raw, COL_START_DATE).unwrap_or_else(|| config.date_of(start_day));
    let end_date = field_date(raw, COL_END_DATE)
        .or_else(|| explicit_end_day.map(|d| config.date_of(d)))
        .unwrap_or(start_date);

    let extra = raw
        .fields()
        .iter()
        .filter(|(k, _)| !is_recognized_column(k) && k != COL_SEQUENCE)
        .map(|(k, v)| (k.clone(), cell_text(v).unwrap_or_default()))
        .collect();

    let mut task = TaskRecord {
        phase: Phase::parse(&raw.text(COL_PHASE).unwrap_or_default()),
        category: Category::parse(&raw.text(COL_CATEGORY).unwrap_or_default()),
        title: raw.text(COL_TITLE).unwrap_or_default(),
        detail: raw.text(COL_DETAIL),
        owner: raw.text(COL_OWNER).unwrap_or_default(),
        status: Status::parse(&raw.text(COL_STATUS).unwrap_or_default()),
        start_date,
        end_date,
        start_day,
        end_day: explicit_end_day.unwrap_or(start_day),
        extra,
    };
    realign(&mut task, config);
    task
}

pub fn normalize_records(raws: &[RawRecord], config: &ScheduleConfig) -> Vec<TaskRecord> {
    raws.iter().map(|r| normalize_record(r, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg() -> ScheduleConfig {
        ScheduleConfig::default()
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_record_defaults_to_epoch() {
        let t = normalize_record(&RawRecord::new(), &cfg());
        assert_eq!(t.start_date, d("2025-11-25"));
        assert_eq!(t.end_date, d("2025-11-25"));
        assert_eq!((t.start_day, t.end_day), (1, 1));
        assert_eq!(t.status, Status::NotStarted);
        assert!(t.title.is_empty());
    }

    #[test]
    fn test_dates_drive_offsets() {
        let raw = RawRecord::new()
            .with(COL_START_DATE, "2025-11-27")
            .with(COL_END_DATE, "2025-12-01 00:00:00");
        let t = normalize_record(&raw, &cfg());
        assert_eq!((t.start_day, t.end_day), (3, 7));
    }

    #[test]
    fn test_offsets_drive_dates_when_dates_absent() {
        let raw = RawRecord::new().with(COL_START_DAY, "10").with(COL_END_DAY, 12.0);
        let t = normalize_record(&raw, &cfg());
        assert_eq!(t.start_date, d("2025-12-04"));
        assert_eq!(t.end_date, d("2025-12-06"));
        assert_eq!((t.start_day, t.end_day), (10, 12));
    }

    #[test]
    fn test_day_column_backs_up_start_day() {
        let raw = RawRecord::new().with(COL_DAY, "5");
        let t = normalize_record(&raw, &cfg());
        assert_eq!((t.start_day, t.end_day), (5, 5));
        assert_eq!(t.start_date, d("2025-11-29"));
    }

    #[test]
    fn test_offset_beyond_max_is_clipped() {
        let raw = RawRecord::new().with(COL_START_DAY, 500);
        let t = normalize_record(&raw, &cfg());
        assert_eq!(t.start_day, 180);
        assert_eq!(t.end_day, 180);
        assert_eq!(t.start_date, cfg().date_of(180));
    }

    #[test]
    fn test_inverted_range_coerced() {
        let raw = RawRecord::new()
            .with(COL_START_DATE, "2025-12-05")
            .with(COL_END_DATE, "2025-12-01");
        let t = normalize_record(&raw, &cfg());
        assert_eq!(t.end_date, d("2025-12-05"));
        assert_eq!(t.span_days(), 1);
    }

    #[test]
    fn test_garbage_degrades_to_defaults() {
        let raw = RawRecord::new()
            .with(COL_START_DAY, "soon")
            .with(COL_START_DATE, "next week")
            .with(COL_END_DATE, json!([1, 2]));
        let t = normalize_record(&raw, &cfg());
        assert_eq!(t.start_date, d("2025-11-25"));
        assert_eq!(t.end_date, d("2025-11-25"));
    }

    #[test]
    fn test_date_before_epoch_clips_to_day_one() {
        let raw = RawRecord::new().with(COL_START_DATE, "2025/11/01");
        let t = normalize_record(&raw, &cfg());
        assert_eq!(t.start_date, d("2025-11-01"));
        assert_eq!(t.start_day, 1);
    }

    #[test]
    fn test_unknown_columns_pass_through() {
        let raw = RawRecord::new()
            .with(COL_TITLE, "Order sake")
            .with("Budget", 12000)
            .with("No.", 3);
        let t = normalize_record(&raw, &cfg());
        assert_eq!(t.extra, vec![("Budget".to_string(), "12000".to_string())]);
    }

    #[test]
    fn test_rfc3339_keeps_date() {
        assert_eq!(parse_date(&json!("2025-12-01T09:30:00+09:00")), Some(d("2025-12-01")));
        assert_eq!(parse_number(&json!("7.9")), Some(7));
        assert_eq!(parse_number(&json!("NaN")), None);
    }

    #[test]
    fn test_huge_day_offset_does_not_panic() {
        let cfg = ScheduleConfig {
            max_schedule_days: 4_000_000_000,
            ..ScheduleConfig::default()
        };
        let raw = RawRecord::new().with(COL_START_DAY, 3_999_999_999u64);
        let t = normalize_record(&raw, &cfg);
        assert_eq!(t.start_date, NaiveDate::MAX);
        assert_eq!(t.end_date, NaiveDate::MAX);
    }
}
