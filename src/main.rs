//! Conditions - Kubernetes-style status conditions
//!
//! CLI entry point. Reads a status document, applies one operation, and
//! prints the result to stdout.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use conditions::cli::{
    IsTrueCommand, MarkCommand, MarkOptions, ShowCommand, ShowOptions, StatusDocument,
    SyncReadyCommand,
};
use conditions::config::Config;
use conditions::error::{exit_codes, Result};
use conditions::ConditionStatus;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CONDITIONS_LOG";

// =============================================================================
// CLI Definition
// =============================================================================

/// Conditions - edit and aggregate status conditions
#[derive(Parser)]
#[command(name = "conditions")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Status document to read (defaults to stdin)
    #[arg(long, short, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set a condition to True
    MarkTrue {
        /// Condition type
        #[arg(value_name = "TYPE")]
        type_: String,
    },

    /// Set a condition to False
    MarkFalse {
        /// Condition type
        #[arg(value_name = "TYPE")]
        type_: String,
        /// Machine-readable reason
        #[arg(long, default_value = "")]
        reason: String,
        /// Human-readable message
        #[arg(long, default_value = "")]
        message: String,
    },

    /// Set a condition to Unknown
    MarkUnknown {
        /// Condition type
        #[arg(value_name = "TYPE")]
        type_: String,
        /// Machine-readable reason
        #[arg(long, default_value = "")]
        reason: String,
        /// Human-readable message
        #[arg(long, default_value = "")]
        message: String,
    },

    /// Recompute the aggregate Ready condition
    SyncReady,

    /// Exit 0 if the condition is True, 1 otherwise
    IsTrue {
        /// Condition type
        #[arg(value_name = "TYPE")]
        type_: String,
    },

    /// Print the conditions
    Show {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("conditions error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Install a stderr fmt subscriber filtered by `CONDITIONS_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load();
    let file = cli.file.as_deref();

    match cli.command {
        Commands::MarkTrue { type_ } => {
            run_mark(file, &config, MarkOptions::new(type_, ConditionStatus::True))
        }
        Commands::MarkFalse {
            type_,
            reason,
            message,
        } => run_mark(
            file,
            &config,
            MarkOptions::new(type_, ConditionStatus::False).with_reason(reason, message),
        ),
        Commands::MarkUnknown {
            type_,
            reason,
            message,
        } => run_mark(
            file,
            &config,
            MarkOptions::new(type_, ConditionStatus::Unknown).with_reason(reason, message),
        ),
        Commands::SyncReady => run_sync_ready(file, &config),
        Commands::IsTrue { type_ } => run_is_true(file, &type_),
        Commands::Show { json } => run_show(file, json),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn run_mark(file: Option<&Path>, config: &Config, options: MarkOptions) -> Result<ExitCode> {
    let mut doc = StatusDocument::read(file)?;
    MarkCommand::new(config).run(&mut doc, &options)?;
    print!("{}", doc.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}

fn run_sync_ready(file: Option<&Path>, config: &Config) -> Result<ExitCode> {
    let mut doc = StatusDocument::read(file)?;
    SyncReadyCommand::new(config).run(&mut doc);
    print!("{}", doc.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}

fn run_is_true(file: Option<&Path>, type_: &str) -> Result<ExitCode> {
    let doc = StatusDocument::read(file)?;
    let result = IsTrueCommand::new().run(&doc, type_)?;
    println!("{}", result);
    if result {
        Ok(ExitCode::from(exit_codes::OK as u8))
    } else {
        Ok(ExitCode::from(exit_codes::NOT_TRUE as u8))
    }
}

fn run_show(file: Option<&Path>, json: bool) -> Result<ExitCode> {
    let doc = StatusDocument::read(file)?;
    print!("{}", ShowCommand::new().run(&doc, &ShowOptions { json })?);
    Ok(ExitCode::SUCCESS)
}
