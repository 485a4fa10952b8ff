use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::error::TaskboardError;
use crate::models::{RawRecord, TaskRecord};
use crate::schedule::{decorate, status_badge, RowDecoration, ScheduleTable, ViewRow};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskboardError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn print(v: &Value) {
    println!("{}", serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()));
}

fn date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn decoration_json(d: &RowDecoration) -> Value {
    json!({
        "category": d.category.as_ref().map(|c| c.as_str()),
        "completed": d.completed,
        "past": d.past
    })
}

pub fn task_json(t: &TaskRecord) -> Value {
    json!({
        "phase": t.phase.as_str(),
        "category": t.category.as_str(),
        "title": t.title,
        "detail": t.detail,
        "owner": t.owner,
        "status": t.status.as_str(),
        "start_date": date(t.start_date),
        "end_date": date(t.end_date),
        "start_day": t.start_day,
        "end_day": t.end_day
    })
}

pub fn view_row_json(row: &ViewRow, t: &TaskRecord, session_date: NaiveDate) -> Value {
    let mut v = task_json(t);
    v["no"] = json!(row.sequence_number);
    v["original_index"] = json!(row.original_index);
    v["badge"] = json!(status_badge(&t.status));
    v["decoration"] = decoration_json(&decorate(t, session_date));
    v
}

pub fn schedule_json(table: &ScheduleTable) -> Value {
    let columns: Vec<Value> = table
        .columns
        .iter()
        .map(|c| {
            json!({
                "label": c.label,
                "date": date(c.first_day),
                "past": c.past
            })
        })
        .collect();
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|r| {
            let cells: Vec<&str> = r.cells.iter().map(|m| m.symbol()).collect();
            json!({
                "no": r.sequence_number,
                "original_index": r.original_index,
                "phase": r.phase.as_str(),
                "category": r.category.as_str(),
                "title": r.title,
                "owner": r.owner,
                "status": r.status.as_str(),
                "start_date": date(r.start_date),
                "end_date": date(r.end_date),
                "cells": cells,
                "decoration": decoration_json(&r.decoration)
            })
        })
        .collect();
    json!({
        "granularity": table.granularity.as_str(),
        "headers": table.headers(),
        "columns": columns,
        "rows": rows
    })
}

pub fn raw_json(r: &RawRecord) -> Value {
    Value::Object(r.to_json_object())
}
