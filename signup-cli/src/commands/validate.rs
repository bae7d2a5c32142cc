//! Validate command - validate a registration document

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use signup_core::{OperationResult, RegistrationInput, RegistrationReport};

use super::{get_context, runtime};
use crate::output;

fn read_document(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            if atty::is(atty::Stream::Stdin) {
                anyhow::bail!("No input. Pass a JSON file or pipe a document on stdin.");
            }
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

pub fn run(file: Option<&Path>, offline: bool, json: bool) -> Result<ExitCode> {
    let document = read_document(file)?;
    let input: RegistrationInput = match serde_json::from_str(&document) {
        Ok(input) => input,
        Err(e) if json => {
            let result = OperationResult::<RegistrationReport>::fail(format!(
                "Invalid registration document: {}",
                e
            ));
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("Invalid registration document"),
    };

    let mut ctx = get_context()?;
    if offline {
        ctx = ctx.offline();
    }

    let report = runtime()?.block_on(ctx.validator.validate(&input));
    let code = if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if json {
        let valid = report.valid;
        let result = OperationResult::ok(report).with_context("valid", serde_json::json!(valid));
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(code);
    }

    output::print_report(&report);
    Ok(code)
}

/// Shared by the interactive command once the form is filled in
pub fn run_input(input: &RegistrationInput, offline: bool) -> Result<ExitCode> {
    let mut ctx = get_context()?;
    if offline {
        ctx = ctx.offline();
    }

    let report = runtime()?.block_on(ctx.validator.validate(input));
    output::print_report(&report);

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
