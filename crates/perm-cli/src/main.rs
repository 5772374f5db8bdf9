//! permctl - reconcile access-control metadata documents
//!
//! - `extend`: keep the grants of one permission set that exceed another
//! - `minimize`: strip every ungranted permission from a profile, in place
//! - `merge`: build the permission set that every profile of a folder grants

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{extend, merge, minimize};
use config::CliConfig;
use error::CliResult;

/// permctl application
#[derive(Parser)]
#[command(name = "permctl")]
#[command(about = "Extend permission sets, minimize and merge profiles", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Write the permissions of TARGET that SOURCE does not grant
    Extend(extend::ExtendArgs),

    /// Remove ungranted permissions from a profile, in place
    Minimize(minimize::MinimizeArgs),

    /// Merge a folder of profiles into their common permission set
    Merge(merge::MergeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Extend(args) => extend::execute(args),
        Commands::Minimize(args) => minimize::execute(args, &config),
        Commands::Merge(args) => merge::execute(args, &config),
    }
}
