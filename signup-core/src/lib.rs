//! Signup Core - registration form validation
//!
//! This crate implements the validation engine following hexagonal architecture:
//!
//! - **domain**: Registration snapshot, field errors, cross-field flags, reports
//! - **ports**: Trait definitions for external dependencies (UsernameLookup)
//! - **services**: Field rules, cross-field rule, uniqueness probe
//! - **adapters**: Concrete lookups (HTTP user directory, in-memory)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::http::HttpUsernameLookup;
use adapters::memory::InMemoryUsernameLookup;
use config::{Config, LookupSettings};
use ports::UsernameLookup;
use services::{RegistrationValidator, UniquenessProbe};

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    CrossFieldErrors, CrossFieldFlag, ExistingAccount, Field, FieldError, FieldErrorKind,
    PreferredContact, RegistrationInput, RegistrationReport, UsernameCheck,
};

/// Main context for signup operations
///
/// Holds the loaded configuration and a validator wired to whichever
/// username lookup the configuration selects.
pub struct SignupContext {
    pub config: Config,
    pub validator: RegistrationValidator,
}

impl SignupContext {
    /// Create a context from the settings in `signup_dir`
    pub fn new(signup_dir: &Path) -> Result<Self> {
        let config = Config::load(signup_dir)?;
        Self::from_config(config)
    }

    /// Create a context from an already loaded configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let mut validator = RegistrationValidator::new(config.rules);

        if let Some(lookup) = build_lookup(&config.lookup)? {
            let probe = UniquenessProbe::new(lookup)
                .with_policy(config.lookup.failure_policy)
                .with_timeout(config.lookup.timeout());
            validator = validator.with_probe(probe);
        }

        Ok(Self { config, validator })
    }

    /// Same context with the username lookup switched off
    pub fn offline(mut self) -> Self {
        self.validator = RegistrationValidator::new(self.config.rules);
        self
    }
}

/// Pick the lookup: the HTTP directory when a URL is set, otherwise the
/// reserved-name list when it is non-empty, otherwise none
pub fn build_lookup(settings: &LookupSettings) -> Result<Option<Arc<dyn UsernameLookup>>> {
    if let Some(url) = &settings.base_url {
        let lookup = HttpUsernameLookup::with_timeout(url, settings.timeout())?;
        return Ok(Some(Arc::new(lookup)));
    }

    if !settings.reserved_usernames.is_empty() {
        let lookup = InMemoryUsernameLookup::from_usernames(settings.reserved_usernames.clone());
        return Ok(Some(Arc::new(lookup)));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lookup_by_default() {
        let ctx = SignupContext::from_config(Config::default()).unwrap();
        assert!(ctx.validator.probe().is_none());
    }

    #[test]
    fn test_reserved_names_use_memory_lookup() {
        let mut config = Config::default();
        config.lookup.reserved_usernames = vec!["admin".to_string()];

        let ctx = SignupContext::from_config(config).unwrap();
        assert_eq!(ctx.validator.probe().unwrap().lookup_name(), "memory");
    }

    #[test]
    fn test_url_selects_http_lookup() {
        let mut config = Config::default();
        config.lookup.base_url = Some("https://directory.example.com".to_string());
        config.lookup.reserved_usernames = vec!["admin".to_string()];

        let ctx = SignupContext::from_config(config).unwrap();
        assert_eq!(ctx.validator.probe().unwrap().lookup_name(), "http");
        assert!(ctx.offline().validator.probe().is_none());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut config = Config::default();
        config.lookup.base_url = Some("not a url".to_string());

        assert!(SignupContext::from_config(config).is_err());
    }
}
