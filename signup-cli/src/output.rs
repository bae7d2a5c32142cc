//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

use signup_core::{CrossFieldFlag, FieldError, RegistrationReport, UsernameCheck};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One row per field error
pub fn field_error_table(errors: &[FieldError]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Field", "Rule", "Message"]);
    for error in errors {
        table.add_row(vec![
            error.field.to_string(),
            error.kind.tag().to_string(),
            error.message(),
        ]);
    }
    table
}

fn username_check_label(check: UsernameCheck) -> String {
    match check {
        UsernameCheck::Passed => check.label().green().to_string(),
        UsernameCheck::Taken => check.label().red().to_string(),
        UsernameCheck::Unverified => check.label().yellow().to_string(),
        UsernameCheck::Skipped | UsernameCheck::NotConfigured => check.label().dimmed().to_string(),
    }
}

/// Print a full validation report
pub fn print_report(report: &RegistrationReport) {
    if !report.field_errors.is_empty() {
        println!("{}", "Field errors".bold());
        println!("{}", field_error_table(&report.field_errors));
        println!();
    }

    let flags: Vec<CrossFieldFlag> = report.cross_field.flags().collect();
    if !flags.is_empty() {
        println!("{}", "Form errors".bold());
        for flag in flags {
            println!("  • {} - {}", flag.as_str().red(), flag.message());
        }
        println!();
    }

    println!(
        "Username availability: {}",
        username_check_label(report.username_check)
    );
    println!();

    if report.valid {
        success("Registration is valid.");
    } else {
        error("Registration is invalid.");
    }
}
