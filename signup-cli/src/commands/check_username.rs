//! Check-username command - ask the directory whether a name is taken

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use signup_core::services::ProbeOutcome;
use signup_core::{Field, OperationResult};

use super::{get_context, runtime};
use crate::output;

pub fn run(username: &str, json: bool) -> Result<ExitCode> {
    let ctx = get_context()?;

    // Same gate the form applies before reaching the directory
    if let Some(error) = ctx.validator.validate_field(Field::Username, username) {
        if json {
            let result = OperationResult::ok(Some(error));
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{} {}", "Invalid:".red(), error);
        }
        return Ok(ExitCode::FAILURE);
    }

    let Some(probe) = ctx.validator.probe() else {
        anyhow::bail!(
            "No username lookup configured. Set lookup.baseUrl in settings.json or SIGNUP_LOOKUP_URL."
        );
    };

    let spinner = if json {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        pb.set_message(format!("Checking '{}' via {} lookup", username, probe.lookup_name()));
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    };

    let outcome = runtime()?.block_on(probe.check(username));
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let error = probe.field_error(&outcome);

    if json {
        let result = OperationResult::ok(error)
            .with_context("lookup", serde_json::json!(probe.lookup_name()))
            .with_context("policy", serde_json::json!(probe.policy()));
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        match &outcome {
            ProbeOutcome::Available => output::success(&format!("'{}' is available", username)),
            ProbeOutcome::Taken { matches } => println!(
                "{} '{}' is already registered ({} match{})",
                "Taken:".red(),
                username,
                matches,
                if *matches == 1 { "" } else { "es" }
            ),
            ProbeOutcome::Unverified { reason } => {
                output::warning(&format!("Could not verify '{}': {}", username, reason));
                if let Some(e) = &error {
                    println!("{} {}", "Invalid:".red(), e);
                } else {
                    println!("Treated as available (fail-open policy).");
                }
            }
        }
    }

    Ok(if error.is_none() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
