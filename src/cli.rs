//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use gwsync::output::OutputMode;

/// gwsync - Declarative API gateway reconciliation
#[derive(Parser, Debug)]
#[command(
    name = "gwsync",
    version,
    about = "Declarative API gateway reconciliation",
    long_about = "Converge API gateway resources to a declared state.\n\n\
                  Applications, their API associations, keys and quotas, and\n\
                  frontend lifecycles are synced with minimal remote calls."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse rate-limit expressions and print their canonical form
    Limit {
        /// Expressions such as "100 msg per 2 minutes"
        #[arg(required = true)]
        expressions: Vec<String>,
    },

    /// Compute the add/remove plan between two identifier sets
    Diff {
        /// Identifiers that should exist
        #[arg(long, value_delimiter = ',')]
        wanted: Vec<String>,

        /// Identifiers that exist now
        #[arg(long, value_delimiter = ',')]
        existing: Vec<String>,
    },

    /// Show the lifecycle calls between two frontend states
    Transition {
        /// Current state: unpublished, published, deprecated
        from: String,

        /// Target state
        to: String,
    },

    /// Replay a declared-state file against a gateway snapshot
    Plan {
        /// Declared-state file (desired.toml)
        desired: PathBuf,

        /// Snapshot of the gateway contents
        #[arg(long)]
        observed: Option<PathBuf>,

        /// Delete every declared resource instead of converging it
        #[arg(long)]
        destroy: bool,
    },

    /// Show the provider configuration
    Config {
        /// Validate the configuration
        #[arg(long)]
        check: bool,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Limit { expressions }) => commands::limit(&expressions, output_mode),
        Some(Command::Diff { wanted, existing }) => commands::diff(&wanted, &existing, output_mode),
        Some(Command::Transition { from, to }) => commands::transition(&from, &to, output_mode),
        Some(Command::Plan {
            desired,
            observed,
            destroy,
        }) => commands::plan(&desired, observed.as_deref(), destroy, output_mode),
        Some(Command::Config { check }) => commands::config(check, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": gwsync::VERSION
                    })
                );
            } else {
                println!("gwsync v{}", gwsync::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": gwsync::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("gwsync v{}", gwsync::VERSION);
                println!("\nRun 'gwsync --help' for usage");
            }
            Ok(())
        },
    }
}
