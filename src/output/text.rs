use chrono::NaiveDate;

use crate::models::TaskRecord;
use crate::schedule::{decorate, status_badge, Marker, ScheduleTable, ViewRow};

pub fn print_task(no: usize, t: &TaskRecord) {
    println!("Task No. {}: {}", no, t.title);
    println!("  Phase: {}", t.phase.as_str());
    println!("  Category: {}", t.category.as_str());
    if !t.owner.is_empty() {
        println!("  Owner: {}", t.owner);
    }
    println!("  Status: {}", t.status.as_str());
    println!(
        "  Period: {} .. {} (day {}..{})",
        t.start_date, t.end_date, t.start_day, t.end_day
    );
    if let Some(ref detail) = t.detail {
        println!("  Detail: {detail}");
    }
}

pub fn print_task_list(rows: &[ViewRow], tasks: &[TaskRecord], session_date: NaiveDate) {
    if rows.is_empty() {
        println!("No tasks match the current filters.");
        return;
    }
    for row in rows {
        let t = &tasks[row.original_index];
        let deco = decorate(t, session_date);
        println!(
            "{:>3}. {} [{}] {} {} .. {} {}{}{}",
            row.sequence_number,
            status_badge(&t.status),
            t.phase.as_str(),
            t.title,
            t.start_date,
            t.end_date,
            if t.owner.is_empty() { String::new() } else { format!("@{} ", t.owner) },
            if deco.past { "(past) " } else { "" },
            t.category.as_str(),
        );
    }
}

fn cell_char(marker: Marker) -> &'static str {
    match marker {
        Marker::Empty => "·",
        other => other.symbol(),
    }
}

pub fn print_schedule(table: &ScheduleTable) {
    if table.is_empty() {
        println!("No tasks to schedule.");
        return;
    }
    if let (Some(first), Some(last)) = (table.columns.first(), table.columns.last()) {
        println!(
            "{} schedule: {} .. {} ({} columns)",
            table.granularity.as_str(),
            first.label,
            last.label,
            table.columns.len()
        );
    }
    for row in &table.rows {
        let strip: String = row.cells.iter().map(|m| cell_char(*m)).collect();
        println!(
            "{:>3}. {:<16} {} [{}] {} .. {}",
            row.sequence_number,
            row.phase.as_str(),
            row.title,
            row.status.as_str(),
            row.start_date,
            row.end_date
        );
        println!("     |{strip}|");
    }
}
