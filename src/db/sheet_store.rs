use std::path::Path;

use rusqlite::{params, Connection};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::TaskboardError;
use crate::models::{cell_text, RawRecord};

use super::connection;

/// Whole-sheet persistence: read everything, overwrite everything.
pub trait TaskStore {
    fn load(&self) -> Result<Vec<RawRecord>, TaskboardError>;
    fn save(&self, records: &[RawRecord]) -> Result<(), TaskboardError>;
}

/// A sheet (header row plus string cells) kept in SQLite.
pub struct SqliteSheetStore {
    conn: Connection,
}

impl SqliteSheetStore {
    pub fn open(path: &Path) -> Result<Self, TaskboardError> {
        Ok(Self {
            conn: connection::open_db(path)?,
        })
    }

    fn read_sheet(&self) -> Result<Vec<RawRecord>, TaskboardError> {
        let mut stmt = self
            .conn
            .prepare("SELECT position, name FROM sheet_columns ORDER BY position ASC")?;
        let header: Vec<(i64, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT row_index, position, value FROM sheet_cells
             ORDER BY row_index ASC, position ASC",
        )?;
        let cells = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, String>(2)?))
        })?;

        let mut records: Vec<RawRecord> = Vec::new();
        let mut current_row: Option<i64> = None;
        for cell in cells {
            let (row_index, position, value) = cell?;
            if current_row != Some(row_index) {
                records.push(RawRecord::new());
                current_row = Some(row_index);
            }
            if value.is_empty() {
                continue;
            }
            if let (Some(record), Some((_, name))) =
                (records.last_mut(), header.iter().find(|(p, _)| *p == position))
            {
                record.set(name, value);
            }
        }
        Ok(records)
    }

    fn write_sheet(&self, records: &[RawRecord]) -> Result<(), TaskboardError> {
        let header = sheet_header(records);
        self.conn.execute("DELETE FROM sheet_cells", [])?;
        self.conn.execute("DELETE FROM sheet_columns", [])?;

        let mut insert_column = self
            .conn
            .prepare("INSERT INTO sheet_columns (position, name) VALUES (?1, ?2)")?;
        for (position, name) in header.iter().enumerate() {
            insert_column.execute(params![position as i64, name])?;
        }

        let mut insert_cell = self.conn.prepare(
            "INSERT INTO sheet_cells (row_index, position, value) VALUES (?1, ?2, ?3)",
        )?;
        for (row_index, record) in records.iter().enumerate() {
            for (position, name) in header.iter().enumerate() {
                let value = record.get(name).and_then(cell_text).unwrap_or_default();
                insert_cell.execute(params![row_index as i64, position as i64, value])?;
            }
        }
        Ok(())
    }
}

impl TaskStore for SqliteSheetStore {
    fn load(&self) -> Result<Vec<RawRecord>, TaskboardError> {
        let records = self
            .read_sheet()
            .map_err(|e| TaskboardError::store_unavailable(e.message))?;
        debug!(rows = records.len(), "loaded sheet");
        Ok(records)
    }

    fn save(&self, records: &[RawRecord]) -> Result<(), TaskboardError> {
        // Full overwrite in one transaction: either the new sheet or the old one.
        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| TaskboardError::store_unavailable(e.to_string()))?;
        let written = self.write_sheet(records).and_then(|()| {
            self.conn.execute_batch("COMMIT").map_err(TaskboardError::from)
        });
        if let Err(e) = written {
            let _ = self.conn.execute_batch("ROLLBACK");
            return Err(TaskboardError::store_unavailable(e.message));
        }
        info!(rows = records.len(), "saved sheet");
        Ok(())
    }
}

/// Union of all columns in first-seen order.
fn sheet_header(records: &[RawRecord]) -> Vec<String> {
    let mut header: Vec<String> = Vec::new();
    for record in records {
        for (name, value) in record.fields() {
            if !header.contains(name) && !matches!(value, Value::Null) {
                header.push(name.clone());
            }
        }
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SqliteSheetStore {
        let path = connection::init_db(dir.path()).unwrap();
        SqliteSheetStore::open(&path).unwrap()
    }

    #[test]
    fn test_fresh_store_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_rows_and_columns() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let records = vec![
            RawRecord::new().with("Title", "A").with("Day", 3),
            RawRecord::new().with("Title", "B").with("Budget", "9000"),
        ];
        s.save(&records).unwrap();
        let loaded = s.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].text("Day").as_deref(), Some("3"));
        assert!(loaded[0].get("Budget").is_none());
        assert_eq!(loaded[1].text("Budget").as_deref(), Some("9000"));
    }

    #[test]
    fn test_save_overwrites_everything() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.save(&[RawRecord::new().with("Title", "A"), RawRecord::new().with("Title", "B")])
            .unwrap();
        s.save(&[RawRecord::new().with("Owner", "Ken")]).unwrap();
        let loaded = s.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].get("Title").is_none());
    }

    #[test]
    fn test_busy_database_save_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.save(&[RawRecord::new().with("Title", "A")]).unwrap();

        let path = connection::db_path(dir.path());
        let other = rusqlite::Connection::open(&path).unwrap();
        other.execute_batch("BEGIN IMMEDIATE").unwrap();
        s.conn.busy_timeout(std::time::Duration::from_millis(10)).unwrap();

        let err = s.save(&[RawRecord::new().with("Title", "B")]).unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreUnavailable);
        other.execute_batch("ROLLBACK").unwrap();
        assert_eq!(s.load().unwrap()[0].text("Title").as_deref(), Some("A"));
    }

    #[test]
    fn test_missing_database_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = SqliteSheetStore::open(&dir.path().join("nope.db")).err().unwrap();
        assert_eq!(err.code, ErrorCode::StoreUnavailable);
    }
}
