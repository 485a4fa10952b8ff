use serde_json::{Map, Value};

use super::task::TaskRecord;

pub const COL_PHASE: &str = "Phase";
pub const COL_CATEGORY: &str = "Category";
pub const COL_TITLE: &str = "Title";
pub const COL_DETAIL: &str = "Detail";
pub const COL_OWNER: &str = "Owner";
pub const COL_STATUS: &str = "Status";
pub const COL_DAY: &str = "Day";
pub const COL_START_DAY: &str = "StartDay";
pub const COL_END_DAY: &str = "EndDay";
pub const COL_START_DATE: &str = "StartDate";
pub const COL_END_DATE: &str = "EndDate";
/// View-only sequence number; dropped on the way into the store.
pub const COL_SEQUENCE: &str = "No.";

pub const RECOGNIZED_COLUMNS: [&str; 11] = [
    COL_PHASE,
    COL_CATEGORY,
    COL_TITLE,
    COL_DETAIL,
    COL_OWNER,
    COL_STATUS,
    COL_DAY,
    COL_START_DAY,
    COL_END_DAY,
    COL_START_DATE,
    COL_END_DATE,
];

pub fn is_recognized_column(name: &str) -> bool {
    RECOGNIZED_COLUMNS.contains(&name)
}

/// A store row as ordered column → value pairs. Values are whatever the store
/// or an import produced: strings, numbers or null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, Value)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Insert or replace a column, keeping the first position it appeared at.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == column) {
            Some((_, v)) => *v = value,
            None => self.fields.push((column.to_string(), value)),
        }
    }

    /// The value of a column, treating null as absent.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v)
            .filter(|v| !v.is_null())
    }

    /// The value as trimmed text; empty text counts as absent.
    pub fn text(&self, column: &str) -> Option<String> {
        let s = match self.get(column)? {
            Value::String(s) => s.trim().to_string(),
            other => cell_text(other)?,
        };
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn from_json_object(map: &Map<String, Value>) -> Self {
        let mut record = Self::new();
        for (k, v) in map {
            if k != COL_SEQUENCE {
                record.set(k, v.clone());
            }
        }
        record
    }

    pub fn to_json_object(&self) -> Map<String, Value> {
        self.fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Render a value the way a spreadsheet cell would hold it.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

impl TaskRecord {
    /// The store row for this record. The sequence number is never written.
    pub fn to_raw(&self) -> RawRecord {
        let mut raw = RawRecord::new()
            .with(COL_DAY, self.start_day.to_string())
            .with(COL_PHASE, self.phase.as_str())
            .with(COL_CATEGORY, self.category.as_str())
            .with(COL_TITLE, self.title.as_str())
            .with(COL_DETAIL, self.detail.clone().unwrap_or_default())
            .with(COL_OWNER, self.owner.as_str())
            .with(COL_STATUS, self.status.as_str())
            .with(COL_START_DAY, self.start_day.to_string())
            .with(COL_END_DAY, self.end_day.to_string())
            .with(COL_START_DATE, self.start_date.format("%Y-%m-%d").to_string())
            .with(COL_END_DATE, self.end_date.format("%Y-%m-%d").to_string());
        for (k, v) in &self.extra {
            raw.set(k, v.as_str());
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_and_blank_are_absent() {
        let r = RawRecord::new()
            .with("Title", Value::Null)
            .with("Owner", "  ")
            .with("Day", 3);
        assert!(r.get("Title").is_none());
        assert!(r.text("Owner").is_none());
        assert_eq!(r.text("Day").as_deref(), Some("3"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut r = RawRecord::new().with("A", "1").with("B", "2");
        r.set("A", "3");
        let keys: Vec<&str> = r.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["A", "B"]);
        assert_eq!(r.text("A").as_deref(), Some("3"));
    }

    #[test]
    fn test_json_import_drops_sequence_number() {
        let obj = json!({"No.": 4, "Title": "x"});
        let r = RawRecord::from_json_object(obj.as_object().unwrap());
        assert!(r.get(COL_SEQUENCE).is_none());
        assert_eq!(r.text(COL_TITLE).as_deref(), Some("x"));
    }
}
