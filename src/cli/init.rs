use serde_json::json;

use crate::cli::{finish, GlobalOpts};
use crate::config;
use crate::db::connection;
use crate::error::TaskboardError;
use crate::output;

pub fn run(opts: &GlobalOpts) -> i32 {
    finish(run_inner(opts.json), opts.json)
}

fn run_inner(json_output: bool) -> Result<i32, TaskboardError> {
    let dir = connection::init_board_dir()?;
    let path = connection::init_db(&dir)?;
    config::write_default(&connection::config_path(&dir))?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "path": path.to_string_lossy()
        })));
    } else {
        println!("Initialized taskboard at {}", path.display());
    }
    Ok(0)
}
