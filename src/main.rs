//! # Rusty Dispatch
//!
//! A command-line train dispatch system for a single station. The operator
//! registers departures, applies delays and track assignments, searches the
//! board and advances the station clock, which purges departed trains.

use chrono::NaiveTime;
use clap::Parser;
use dotenvy::dotenv;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rusty_dispatch::clock::Clock;
use rusty_dispatch::departure_board::DepartureBoard;
use rusty_dispatch::error::AppError;
use rusty_dispatch::menu::{Session, sample_departures};
use rusty_dispatch::{constants, time};

/// Defines the command-line arguments for the dispatch application.
#[derive(Parser, Debug)]
#[command(
    name = "rusty_dispatch",
    version,
    about = "A CLI for dispatching train departures from a single station.",
    long_about = None
)]
struct Cli {
    /// Optional: the station clock time to start at, overriding DISPATCH_START_TIME.
    #[arg(short, long, value_parser = time::parse_hhmm, help = "Start time in HH:MM format.")]
    start_time: Option<NaiveTime>,

    /// Start with an empty board instead of the sample departures.
    #[arg(long)]
    no_sample_data: bool,

    /// Do not clear the terminal before each menu.
    #[arg(long)]
    no_clear: bool,
}

/// Installs the `tracing` subscriber.
///
/// Logs go to stderr so they never interleave with the menu on stdout. The
/// default level is `warn`; set `RUST_LOG` (e.g. `RUST_LOG=rusty_dispatch=debug`)
/// to see board activity.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Resolves the configured start time from the environment.
///
/// Invalid values only reach this point under `graceful-config`; they are
/// logged and the clock starts at midnight.
fn configured_start_time() -> Option<NaiveTime> {
    constants::start_time().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring invalid configuration, starting at 00:00");
        None
    })
}

/// The main entry point for the application.
///
/// 1. Loads environment variables from a `.env` file.
/// 2. Parses command-line arguments and resolves the start time.
/// 3. Seeds the board and hands control to the operator menu.
fn main() -> Result<(), AppError> {
    // Load environment variables from a .env file, if it exists.
    let _ = dotenv();
    init_logging();

    // If the `fail-fast-config` feature is enabled, validate the environment
    // at startup and exit if anything is invalid.
    #[cfg(feature = "fail-fast-config")]
    {
        if let Err(e) = constants::validate_config() {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    }

    let cli = Cli::parse();
    let start_time = cli
        .start_time
        .or_else(configured_start_time)
        .unwrap_or(NaiveTime::MIN);

    ctrlc::set_handler(|| {
        println!("\nExiting...");
        std::process::exit(0);
    })?;

    let mut board = DepartureBoard::new();
    if !cli.no_sample_data {
        for departure in sample_departures() {
            if !board.add(departure) {
                warn!("duplicate sample departure skipped");
            }
        }
    }
    info!(
        departures = board.len(),
        start = %time::format_hhmm(start_time),
        "station opened"
    );

    let stdin = io::stdin();
    let mut session = Session::new(board, Clock::starting_at(start_time), stdin.lock(), io::stdout())
        .with_clear_screen(!cli.no_clear);
    session.run()?;

    println!("\nExiting...");

    Ok(())
}
