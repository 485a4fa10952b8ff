use clap::Parser;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskboard::cli;
use taskboard::cli::commands::{Cli, Commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    init_tracing();
    let cli_args = Cli::parse();
    let opts = cli::GlobalOpts::from_cli(&cli_args);

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(&opts),
        Commands::List => cli::task::list(&opts),
        Commands::Schedule { weekly } => cli::schedule::run(&opts, weekly),
        Commands::Add(args) => cli::task::add(&opts, args),
        Commands::Edit(args) => cli::task::edit(&opts, args),
        Commands::Delete { no } => cli::task::delete(&opts, no),
        Commands::Owners => cli::task::owners(&opts),
        Commands::Import => cli::sheet::import(&opts),
        Commands::Export => cli::sheet::export(&opts),
    };

    process::exit(exit_code);
}
