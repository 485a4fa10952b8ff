use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::TaskboardError;

use super::migrations;

pub const BOARD_DIR_NAME: &str = ".taskboard";
pub const BOARD_DIR_ENV: &str = "TASKBOARD_DIR";

/// Find the board directory: `$TASKBOARD_DIR`, or the nearest `.taskboard/`
/// walking up from the current directory.
pub fn find_board_dir() -> Result<PathBuf, TaskboardError> {
    if let Some(dir) = env::var_os(BOARD_DIR_ENV) {
        let dir = PathBuf::from(dir);
        return if dir.is_dir() {
            Ok(dir)
        } else {
            Err(TaskboardError::not_initialized())
        };
    }
    let mut dir = env::current_dir().map_err(|e| TaskboardError::database(e.to_string()))?;
    loop {
        let candidate = dir.join(BOARD_DIR_NAME);
        if candidate.is_dir() {
            return Ok(candidate);
        }
        if !dir.pop() {
            return Err(TaskboardError::not_initialized());
        }
    }
}

/// Where `init` creates the board.
pub fn init_board_dir() -> Result<PathBuf, TaskboardError> {
    match env::var_os(BOARD_DIR_ENV) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => env::current_dir()
            .map(|d| d.join(BOARD_DIR_NAME))
            .map_err(|e| TaskboardError::database(e.to_string())),
    }
}

pub fn db_path(board_dir: &Path) -> PathBuf {
    board_dir.join("taskboard.db")
}

pub fn config_path(board_dir: &Path) -> PathBuf {
    board_dir.join("config.json")
}

/// Open an existing sheet database. A missing file means the store is gone,
/// which is not the same as an empty sheet.
pub fn open_db(path: &Path) -> Result<Connection, TaskboardError> {
    if !path.exists() {
        return Err(TaskboardError::store_unavailable(format!(
            "{} does not exist",
            path.display()
        )));
    }
    let conn = Connection::open(path).map_err(|e| TaskboardError::store_unavailable(e.to_string()))?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Create the board directory and database, and run migrations.
pub fn init_db(board_dir: &Path) -> Result<PathBuf, TaskboardError> {
    fs::create_dir_all(board_dir).map_err(|e| TaskboardError::database(e.to_string()))?;
    let path = db_path(board_dir);
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

fn configure_connection(conn: &Connection) -> Result<(), TaskboardError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}
