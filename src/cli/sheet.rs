use std::io::{self, Read};

use serde_json::{json, Value};

use crate::cli::{finish, open_session, GlobalOpts};
use crate::error::TaskboardError;
use crate::models::{RawRecord, TaskRecord};
use crate::output;

pub fn import(opts: &GlobalOpts) -> i32 {
    finish(run_import(opts), opts.json)
}

pub fn export(opts: &GlobalOpts) -> i32 {
    finish(run_export(opts), opts.json)
}

fn parse_rows(input: &str) -> Result<Vec<RawRecord>, TaskboardError> {
    let value: Value = serde_json::from_str(input)?;
    let rows = value
        .as_array()
        .ok_or_else(|| TaskboardError::validation("Expected a JSON array of rows"))?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.as_object()
                .map(RawRecord::from_json_object)
                .ok_or_else(|| TaskboardError::validation(format!("Row {i} is not a JSON object")))
        })
        .collect()
}

fn run_import(opts: &GlobalOpts) -> Result<i32, TaskboardError> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| TaskboardError::validation(format!("Failed to read stdin: {e}")))?;
    let rows = parse_rows(&input)?;

    let mut session = open_session(opts)?;
    let count = session.replace_all(&rows)?;

    if opts.json {
        output::json::print(&output::json::success(json!({ "imported": count })));
    } else {
        println!("Imported {count} tasks.");
    }
    Ok(0)
}

fn run_export(opts: &GlobalOpts) -> Result<i32, TaskboardError> {
    let session = open_session(opts)?;
    let rows: Vec<Value> = session
        .tasks()
        .iter()
        .map(TaskRecord::to_raw)
        .map(|r| output::json::raw_json(&r))
        .collect();

    if opts.json {
        output::json::print(&output::json::success(json!({ "rows": rows })));
    } else {
        output::json::print(&Value::Array(rows));
    }
    Ok(0)
}
