//! Full-form validation report

use serde::{Deserialize, Serialize};

use super::cross_field::CrossFieldErrors;
use super::field_error::FieldError;
use super::registration::Field;

/// What happened to the asynchronous username check during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UsernameCheck {
    /// Lookup found no account with this name
    Passed,
    /// Lookup found at least one account
    Taken,
    /// Synchronous username checks failed, so no lookup was made
    Skipped,
    /// Lookup failed; outcome depends on the failure policy
    Unverified,
    /// Validator has no lookup capability
    NotConfigured,
}

impl UsernameCheck {
    /// Human-readable label; the JSON form uses the camelCase variant name
    pub fn label(&self) -> &'static str {
        match self {
            UsernameCheck::Passed => "passed",
            UsernameCheck::Taken => "taken",
            UsernameCheck::Skipped => "skipped",
            UsernameCheck::Unverified => "unverified",
            UsernameCheck::NotConfigured => "not configured",
        }
    }
}

/// Outcome of validating a whole registration snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReport {
    pub field_errors: Vec<FieldError>,
    pub cross_field: CrossFieldErrors,
    pub username_check: UsernameCheck,
    pub valid: bool,
}

impl RegistrationReport {
    pub fn new(
        field_errors: Vec<FieldError>,
        cross_field: CrossFieldErrors,
        username_check: UsernameCheck,
    ) -> Self {
        let valid = field_errors.is_empty() && cross_field.is_empty();
        Self {
            field_errors,
            cross_field,
            username_check,
            valid,
        }
    }

    /// Field error for a given field, if any
    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.field_errors.iter().find(|e| e.field == field)
    }
}
