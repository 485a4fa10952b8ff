pub mod commands;
pub mod init;
pub mod schedule;
pub mod sheet;
pub mod task;

pub use commands::*;

use chrono::{Local, NaiveDate};

use crate::config;
use crate::db::{connection, SqliteSheetStore};
use crate::error::TaskboardError;
use crate::models::{Phase, Status};
use crate::output;
use crate::schedule::TaskFilter;
use crate::session::Session;

/// Flags shared by every command.
pub struct GlobalOpts {
    pub json: bool,
    pub today: NaiveDate,
    pub filter: TaskFilter,
}

impl GlobalOpts {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            today: cli.today.unwrap_or_else(|| Local::now().date_naive()),
            filter: TaskFilter {
                phases: cli.phase_filter.iter().map(|p| Phase::parse(p)).collect(),
                owners: cli.owner_filter.iter().map(|o| o.trim().to_string()).collect(),
                statuses: cli.status_filter.iter().map(|s| Status::parse(s)).collect(),
            },
        }
    }
}

pub fn open_session(opts: &GlobalOpts) -> Result<Session<SqliteSheetStore>, TaskboardError> {
    let dir = connection::find_board_dir()?;
    let config = config::load(&connection::config_path(&dir))?;
    let store = SqliteSheetStore::open(&connection::db_path(&dir))?;
    Session::open(store, config, opts.today)
}

/// Report a command result and turn it into an exit code.
pub fn finish(result: Result<i32, TaskboardError>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
