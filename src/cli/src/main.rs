//! Intake CLI - Command-line host for the patient intake form.
//!
//! Loads form snapshots into the intake page and runs validation, review,
//! submission and saved-preference commands against them.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{check, field, prefs, review, states, submit};
use intake_core::config::Config;
use intake_core::telemetry::init_logging;
use intake_core::IntakeError;
use output::OutputFormat;

/// Intake - Patient intake form validation CLI
#[derive(Parser)]
#[command(
    name = "intake",
    author = "Alixia Medical Web Team",
    version = "0.1.0",
    about = "Intake - Patient intake form validation",
    long_about = "CLI tool for validating, reviewing and submitting patient intake forms.",
    propagate_version = true
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    output: OutputFormat,

    /// Configuration file (toml, json or yaml)
    #[arg(short, long, global = true, env = "INTAKE_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every field of a snapshot and run the submit gate
    Check(check::CheckArgs),

    /// Validate a single field value
    Field(field::FieldArgs),

    /// Show the review table for a snapshot
    Review(review::ReviewArgs),

    /// Submit a snapshot through the gate and confirmation
    Submit(submit::SubmitArgs),

    /// List the state options
    States(states::StatesArgs),

    /// Saved preferences management
    #[command(subcommand)]
    Prefs(prefs::PrefsCommands),
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            let path = path.to_string_lossy();
            Config::from_file(&path).with_context(|| format!("Failed to load config {}", path))
        }
        None => Config::load().context("Failed to load config from environment"),
    }
}

/// Log the underlying intake error, report it and exit.
fn fail(e: &anyhow::Error) -> ! {
    if let Some(err) = e.chain().find_map(|c| c.downcast_ref::<IntakeError>()) {
        err.log();
    }
    output::print_error(&format!("{:#}", e));
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    init_logging(&config.logging)?;

    let format = cli.output;

    let result = match cli.command {
        Commands::Check(args) => check::execute(args, &config, format).await,
        Commands::Field(args) => field::execute(args, &config, format).await,
        Commands::Review(args) => review::execute(args, &config, format).await,
        Commands::Submit(args) => submit::execute(args, &config, format).await,
        Commands::States(args) => states::execute(args, &config, format).await,
        Commands::Prefs(cmd) => prefs::execute(cmd, &config, format).await,
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => fail(&e),
    }

    Ok(())
}
