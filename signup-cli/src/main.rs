//! Signup CLI - validate registration data from the terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{check_username, config, field, register, validate};

/// Environment variable holding the log filter (e.g. `debug`, `signup_core=debug`)
const LOG_ENV: &str = "SIGNUP_LOG";

/// Signup - registration form validation
#[derive(Parser)]
#[command(name = "signup", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a registration document (JSON)
    Validate {
        /// Path to the JSON document (reads stdin when omitted)
        file: Option<PathBuf>,
        /// Skip the username availability lookup
        #[arg(long)]
        offline: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a single field value
    Field {
        /// Field name (username, email, password, confirm-password, phone-number, preferred-contact)
        field: String,
        /// Value to check
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a username is already registered
    CheckUsername {
        /// Username to look up
        username: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill in the registration form interactively
    Register {
        /// Skip the username availability lookup
        #[arg(long)]
        offline: bool,
    },

    /// Show the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Validate {
            file,
            offline,
            json,
        } => validate::run(file.as_deref(), offline, json),
        Commands::Field { field, value, json } => field::run(&field, &value, json),
        Commands::CheckUsername { username, json } => check_username::run(&username, json),
        Commands::Register { offline } => register::run(offline),
        Commands::Config { json } => config::run(json).map(|()| ExitCode::SUCCESS),
    }
}
