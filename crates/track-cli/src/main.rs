use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use track_cli::commands::{list, start, status, stop, util, watch};
use track_cli::{Cli, Commands, Config, StateConflict};
use track_store::EntryStore;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(conflict) = err.downcast_ref::<StateConflict>() {
                println!("{conflict}");
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let store = EntryStore::new(&config.data_file);
    let mut stdout = io::stdout();

    match command {
        Commands::Start { title, watch } => {
            let user = util::current_user();
            start::run(&mut stdout, &store, title.as_deref(), &user, Utc::now())?;
            if let Some(secs) = watch {
                let interval = config.watch_interval(*secs)?;
                watch::run(interval, |out| status::run(out, &store, Utc::now()))?;
            }
        }
        Commands::Stop => {
            stop::run(&mut stdout, &store, Utc::now())?;
        }
        Commands::Status { watch } => match watch {
            Some(secs) => {
                let interval = config.watch_interval(*secs)?;
                watch::run(interval, |out| status::run(out, &store, Utc::now()))?;
            }
            None => status::run(&mut stdout, &store, Utc::now())?,
        },
        Commands::List { range, json } => {
            list::run(&mut stdout, &store, range.period(), *json, Local::now())?;
        }
    }

    Ok(())
}
