//! Field command - check one field value

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use signup_core::{Field, OperationResult};

use super::get_context;
use crate::output;

pub fn run(field: &str, value: &str, json: bool) -> Result<ExitCode> {
    let ctx = get_context()?;
    let checked = field
        .parse::<Field>()
        .map(|parsed| (parsed, ctx.validator.validate_field(parsed, value)));

    if json {
        let passed = matches!(checked, Ok((_, None)));
        // An unknown field name becomes a failed result rather than a bare error
        let result = OperationResult::from(checked.map(|(_, error)| error))
            .with_context("field", serde_json::json!(field));
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(if passed {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let (field, error) = checked?;
    match &error {
        Some(e) => println!("{} {}", "Invalid:".red(), e),
        None => output::success(&format!("{} looks good", field)),
    }

    Ok(if error.is_none() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
