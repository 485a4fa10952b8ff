use rusqlite::Connection;

use crate::error::TaskboardError;

pub fn run_migrations(conn: &Connection) -> Result<(), TaskboardError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sheet_columns (
            position INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS sheet_cells (
            row_index INTEGER NOT NULL,
            position INTEGER NOT NULL REFERENCES sheet_columns(position),
            value TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (row_index, position)
        );

        CREATE INDEX IF NOT EXISTS idx_cells_row ON sheet_cells(row_index);
        ",
    )?;
    Ok(())
}
