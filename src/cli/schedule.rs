use crate::cli::{finish, open_session, GlobalOpts};
use crate::error::TaskboardError;
use crate::output;
use crate::schedule::Granularity;

pub fn run(opts: &GlobalOpts, weekly: bool) -> i32 {
    finish(run_inner(opts, weekly), opts.json)
}

fn run_inner(opts: &GlobalOpts, weekly: bool) -> Result<i32, TaskboardError> {
    let mut session = open_session(opts)?;
    let granularity = if weekly {
        Granularity::Weekly
    } else {
        Granularity::Daily
    };
    let table = session.schedule(granularity, &opts.filter);

    if opts.json {
        output::json::print(&output::json::success(output::json::schedule_json(&table)));
    } else {
        output::text::print_schedule(&table);
    }
    Ok(0)
}
