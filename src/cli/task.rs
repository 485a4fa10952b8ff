use serde_json::json;

use crate::cli::commands::{AddArgs, EditArgs};
use crate::cli::{finish, open_session, GlobalOpts};
use crate::error::TaskboardError;
use crate::models::{Category, Phase, Status};
use crate::output;
use crate::schedule::owner_names;
use crate::session::{NewTask, TaskEdit};

pub fn list(opts: &GlobalOpts) -> i32 {
    finish(run_list(opts), opts.json)
}

pub fn add(opts: &GlobalOpts, args: AddArgs) -> i32 {
    finish(run_add(opts, args), opts.json)
}

pub fn edit(opts: &GlobalOpts, args: EditArgs) -> i32 {
    finish(run_edit(opts, args), opts.json)
}

pub fn delete(opts: &GlobalOpts, no: usize) -> i32 {
    finish(run_delete(opts, no), opts.json)
}

pub fn owners(opts: &GlobalOpts) -> i32 {
    finish(run_owners(opts), opts.json)
}

fn parse_phase(s: &str) -> Result<Phase, TaskboardError> {
    Phase::from_str(s).ok_or_else(|| {
        let known: Vec<&str> = Phase::KNOWN.iter().map(|p| p.as_str()).collect();
        TaskboardError::validation(format!("Unknown phase '{s}'. Expected one of: {}", known.join(", ")))
    })
}

fn parse_category(s: &str) -> Result<Category, TaskboardError> {
    Category::from_str(s).ok_or_else(|| TaskboardError::validation(format!("Unknown category '{s}'")))
}

fn parse_status(s: &str) -> Result<Status, TaskboardError> {
    Status::from_str(s).ok_or_else(|| {
        TaskboardError::validation(format!(
            "Unknown status '{s}'. Expected one of: not-started, in-progress, done"
        ))
    })
}

fn run_list(opts: &GlobalOpts) -> Result<i32, TaskboardError> {
    let session = open_session(opts)?;
    let rows = session.list_view(&opts.filter);

    if opts.json {
        let tasks_json: Vec<_> = rows
            .iter()
            .map(|r| output::json::view_row_json(r, &session.tasks()[r.original_index], opts.today))
            .collect();
        output::json::print(&output::json::success(json!({
            "tasks": tasks_json,
            "total": session.tasks().len()
        })));
    } else {
        output::text::print_task_list(&rows, session.tasks(), opts.today);
    }
    Ok(0)
}

fn run_add(opts: &GlobalOpts, args: AddArgs) -> Result<i32, TaskboardError> {
    // Validate before touching the store.
    let new = NewTask {
        title: args.title,
        phase: parse_phase(&args.phase)?,
        category: parse_category(&args.category)?,
        owner: args.owner,
        status: parse_status(&args.status)?,
        detail: args.detail,
        start_date: args.start,
        end_date: args.end,
    };
    let mut session = open_session(opts)?;
    let index = session.add_task(new)?;
    let task = &session.tasks()[index];

    if opts.json {
        let mut v = output::json::task_json(task);
        v["original_index"] = json!(index);
        output::json::print(&output::json::success(json!({ "task": v })));
    } else {
        println!("Added task: {} ({} .. {})", task.title, task.start_date, task.end_date);
    }
    Ok(0)
}

fn run_edit(opts: &GlobalOpts, args: EditArgs) -> Result<i32, TaskboardError> {
    let edit = TaskEdit {
        title: args.title,
        phase: args.phase.as_deref().map(parse_phase).transpose()?,
        category: args.category.as_deref().map(parse_category).transpose()?,
        owner: args.owner,
        status: args.status.as_deref().map(parse_status).transpose()?,
        detail: args.detail,
        start_date: args.start,
        end_date: args.end,
        start_day: args.start_day,
        end_day: args.end_day,
    };
    let mut session = open_session(opts)?;
    let index = session.resolve_sequence(&opts.filter, args.no)?;
    let task = session.edit_task(index, edit)?;

    if opts.json {
        let mut v = output::json::task_json(task);
        v["original_index"] = json!(index);
        output::json::print(&output::json::success(json!({ "task": v })));
    } else {
        output::text::print_task(args.no, task);
    }
    Ok(0)
}

fn run_delete(opts: &GlobalOpts, no: usize) -> Result<i32, TaskboardError> {
    let mut session = open_session(opts)?;
    let index = session.resolve_sequence(&opts.filter, no)?;
    let removed = session.delete_task(index)?;

    if opts.json {
        output::json::print(&output::json::success(json!({
            "deleted": output::json::task_json(&removed),
            "remaining": session.tasks().len()
        })));
    } else {
        println!("Deleted task: {} ({})", removed.title, removed.owner);
    }
    Ok(0)
}

fn run_owners(opts: &GlobalOpts) -> Result<i32, TaskboardError> {
    let session = open_session(opts)?;
    let names = owner_names(session.tasks());

    if opts.json {
        output::json::print(&output::json::success(json!({ "owners": names })));
    } else if names.is_empty() {
        println!("No owners found.");
    } else {
        for name in &names {
            println!("  {name}");
        }
    }
    Ok(0)
}
