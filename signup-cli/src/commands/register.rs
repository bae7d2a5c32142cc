//! Register command - fill in the form interactively

use std::process::ExitCode;

use anyhow::Result;
use dialoguer::{Input, Password, Select};

use signup_core::{PreferredContact, RegistrationInput};

use super::validate;

pub fn run(offline: bool) -> Result<ExitCode> {
    let username: String = Input::new().with_prompt("Username").allow_empty(true).interact_text()?;
    let email: String = Input::new().with_prompt("Email").allow_empty(true).interact_text()?;
    let password = Password::new().with_prompt("Password").allow_empty_password(true).interact()?;
    let confirm_password = Password::new()
        .with_prompt("Confirm password")
        .allow_empty_password(true)
        .interact()?;
    let phone_number: String = Input::new()
        .with_prompt("Phone number (optional)")
        .allow_empty(true)
        .interact_text()?;

    let choices = [PreferredContact::Email, PreferredContact::Phone];
    let labels: Vec<&str> = choices.iter().map(|c| c.as_str()).collect();
    let selected = Select::new()
        .with_prompt("Preferred contact")
        .items(&labels)
        .default(0)
        .interact()?;

    let input = RegistrationInput {
        username,
        email,
        password,
        confirm_password,
        phone_number,
        preferred_contact: choices[selected],
    };

    println!();
    validate::run_input(&input, offline)
}
