//! Configuration management
//!
//! Settings live in `settings.json` inside the signup directory:
//! ```json
//! {
//!   "usernameMinLength": 3,
//!   "passwordMinLength": 6,
//!   "lookup": {
//!     "baseUrl": "https://directory.example.com",
//!     "timeoutMs": 5000,
//!     "failurePolicy": "failOpen",
//!     "reservedUsernames": ["admin"]
//!   }
//! }
//! ```
//! Keys this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::services::{FailurePolicy, ValidationRules, DEFAULT_LOOKUP_TIMEOUT};

/// Overrides the user directory URL
pub const LOOKUP_URL_ENV: &str = "SIGNUP_LOOKUP_URL";
/// Overrides the lookup timeout, in milliseconds
pub const LOOKUP_TIMEOUT_ENV: &str = "SIGNUP_LOOKUP_TIMEOUT_MS";
/// Forces the failure policy (`true` = fail closed)
pub const FAIL_CLOSED_ENV: &str = "SIGNUP_FAIL_CLOSED";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    /// Length limits sit at the top level of the file
    #[serde(flatten)]
    validation: ValidationRules,
    #[serde(default)]
    lookup: LookupSettings,
    // Must stay after `validation` so its keys are taken first
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Username lookup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupSettings {
    /// Root of the user directory; `None` disables the HTTP lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Names treated as taken when no directory URL is set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reserved_usernames: Vec<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT.as_millis() as u64
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: default_timeout_ms(),
            failure_policy: FailurePolicy::default(),
            reserved_usernames: Vec::new(),
        }
    }
}

impl LookupSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Signup configuration (simplified view of settings)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub rules: ValidationRules,
    pub lookup: LookupSettings,
}

impl Config {
    /// Load config from the signup directory
    ///
    /// A missing settings file yields defaults. Environment variables
    /// override the lookup settings (for CI/testing).
    pub fn load(signup_dir: &Path) -> Result<Self> {
        let raw = read_settings(&signup_dir.join("settings.json"))?;
        let mut lookup = raw.lookup;

        if let Ok(url) = std::env::var(LOOKUP_URL_ENV) {
            lookup.base_url = Some(url).filter(|u| !u.trim().is_empty());
        }

        if let Ok(ms) = std::env::var(LOOKUP_TIMEOUT_ENV) {
            lookup.timeout_ms = ms
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of milliseconds", LOOKUP_TIMEOUT_ENV))?;
        }

        match std::env::var(FAIL_CLOSED_ENV).ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => {
                lookup.failure_policy = FailurePolicy::FailClosed
            }
            Some("false" | "0" | "no" | "FALSE" | "NO") => {
                lookup.failure_policy = FailurePolicy::FailOpen
            }
            _ => {}
        }

        Ok(Self {
            rules: raw.validation,
            lookup,
        })
    }

    /// Save config to the signup directory
    /// Preserves other settings that this crate doesn't manage
    pub fn save(&self, signup_dir: &Path) -> Result<()> {
        let settings_path = signup_dir.join("settings.json");

        let mut settings = read_settings(&settings_path)?;
        settings.validation = self.rules;
        settings.lookup = self.lookup.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid settings in {}", path.display()))
}
