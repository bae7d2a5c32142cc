//! Config command - show the effective configuration

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use super::{get_context, get_signup_dir};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let signup_dir = get_signup_dir()?;
    let ctx = get_context()?;
    let config = &ctx.config;
    let lookup = ctx
        .validator
        .probe()
        .map(|p| p.lookup_name().to_string())
        .unwrap_or_else(|| "none".to_string());

    if json {
        let value = json!({
            "directory": signup_dir,
            "validation": config.rules,
            "lookup": config.lookup,
            "activeLookup": lookup,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Signup Configuration".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Settings directory".to_string(), signup_dir.display().to_string()]);
    table.add_row(vec![
        "Username min length".to_string(),
        config.rules.username_min_length.to_string(),
    ]);
    table.add_row(vec![
        "Password min length".to_string(),
        config.rules.password_min_length.to_string(),
    ]);
    table.add_row(vec!["Username lookup".to_string(), lookup]);
    table.add_row(vec![
        "Directory URL".to_string(),
        config.lookup.base_url.clone().unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec![
        "Lookup timeout".to_string(),
        format!("{} ms", config.lookup.timeout_ms),
    ]);
    table.add_row(vec![
        "Failure policy".to_string(),
        format!("{:?}", config.lookup.failure_policy),
    ]);
    table.add_row(vec![
        "Reserved usernames".to_string(),
        config.lookup.reserved_usernames.len().to_string(),
    ]);
    println!("{}", table);

    Ok(())
}
