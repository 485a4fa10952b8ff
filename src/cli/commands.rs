use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

const VERSION: &str = env!("TASKBOARD_VERSION");

#[derive(Parser)]
#[command(
    name = "taskboard",
    version = VERSION,
    about = "Team task board with daily and weekly schedule grids",
    after_help = "\
NOTE:
  The board lives in <dir>/.taskboard/ (database + config.json), found by walking
  up from the current directory, or at $TASKBOARD_DIR if set.
  Run `taskboard init` before any other command.

EXIT CODES:
  0  Success
  1  Error (store unavailable, validation, unknown task, etc.)

NUMBERING:
  Task numbers (No.) are recomputed for every view. `edit`/`delete` resolve
  No. against the list view produced by the same filter flags.

LOGGING:
  Set TASKBOARD_LOG (e.g. `debug`) to log to stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Session date for past-task shading (YYYY-MM-DD, default: today)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Only tasks in this phase (repeatable)
    #[arg(long = "phase-filter", global = true)]
    pub phase_filter: Vec<String>,

    /// Only tasks whose owner contains this name (repeatable)
    #[arg(long = "owner-filter", global = true)]
    pub owner_filter: Vec<String>,

    /// Only tasks with this status (repeatable)
    #[arg(long = "status-filter", global = true)]
    pub status_filter: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the board directory, database and default config
    Init,

    /// List tasks ordered by start date, phase and title
    List,

    /// Show the schedule grid
    #[command(after_help = "\
MARKERS:
  ■ task in progress over a span   ● single-day task   ✔ done
  Weekly view marks every overlapped week with ■ (or ✔).
  If the filters match nothing, every task is scheduled.")]
    Schedule {
        /// One column per project week instead of per day
        #[arg(long)]
        weekly: bool,
    },

    /// Add a task
    Add(AddArgs),

    /// Edit a task by its list number
    Edit(EditArgs),

    /// Delete a task by its list number (no undo)
    Delete {
        /// Task No. in the current list view
        no: usize,
    },

    /// List individual owner names for --owner-filter
    Owners,

    /// Replace the whole board from a JSON array of rows on stdin
    #[command(after_help = "\
STDIN FORMAT:
  [{\"Title\":\"...\", \"Phase\":\"Phase1-Design\", \"StartDate\":\"2025-11-25\", ...}, ...]

NOTE:
  Full overwrite. Missing or malformed dates and day offsets fall back to
  defaults; unknown columns are kept as-is.")]
    Import,

    /// Print the board as a JSON array of rows
    Export,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title (required)
    pub title: String,
    #[arg(long, default_value = "Phase1-Design")]
    pub phase: String,
    #[arg(long, default_value = "Opening Plan")]
    pub category: String,
    /// Owner(s), e.g. "Ken, Aya"
    #[arg(long, default_value = "")]
    pub owner: String,
    #[arg(long, default_value = "not-started")]
    pub status: String,
    /// Start date (default: session date)
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// End date (default: start date; earlier dates snap to start)
    #[arg(long)]
    pub end: Option<NaiveDate>,
    #[arg(long)]
    pub detail: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task No. in the current list view
    pub no: usize,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub phase: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub detail: Option<String>,
    #[arg(long)]
    pub start: Option<NaiveDate>,
    #[arg(long)]
    pub end: Option<NaiveDate>,
    /// Start as a day offset from the project epoch (ignored with --start)
    #[arg(long)]
    pub start_day: Option<u32>,
    /// End as a day offset from the project epoch (ignored with --end)
    #[arg(long)]
    pub end_day: Option<u32>,
}
