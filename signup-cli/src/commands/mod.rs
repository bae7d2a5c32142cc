//! CLI command implementations

pub mod check_username;
pub mod config;
pub mod field;
pub mod register;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::debug;

use signup_core::SignupContext;

/// Get the signup directory from environment or default
pub fn get_signup_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SIGNUP_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".signup"))
        .context("Could not find home directory; set SIGNUP_DIR")
}

/// Load settings and build the validator
pub fn get_context() -> Result<SignupContext> {
    let signup_dir = get_signup_dir()?;
    debug!(dir = %signup_dir.display(), "loading settings");
    SignupContext::new(&signup_dir)
        .with_context(|| format!("Failed to load settings from {}", signup_dir.display()))
}

/// Runtime for the asynchronous username lookup
pub fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}
