//! Field-scoped validation failures

use std::fmt;

use serde::{Deserialize, Serialize};

use super::registration::Field;

/// Why a single field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldErrorKind {
    /// Value is empty
    Required,
    /// Value is shorter than the configured minimum
    #[serde(rename = "minlength", rename_all = "camelCase")]
    MinLength {
        required_length: usize,
        actual_length: usize,
    },
    /// Value does not look like an email address
    Email,
    /// Another account already uses this username
    UsernameTaken,
    /// Uniqueness could not be checked and the probe is configured to fail closed
    LookupUnavailable,
}

impl FieldErrorKind {
    /// Short tag used by form renderers (`required`, `minlength`, ...)
    pub fn tag(&self) -> &'static str {
        match self {
            FieldErrorKind::Required => "required",
            FieldErrorKind::MinLength { .. } => "minlength",
            FieldErrorKind::Email => "email",
            FieldErrorKind::UsernameTaken => "usernameTaken",
            FieldErrorKind::LookupUnavailable => "lookupUnavailable",
        }
    }
}

/// A failure tied to one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    pub fn required(field: Field) -> Self {
        Self::new(field, FieldErrorKind::Required)
    }

    pub fn min_length(field: Field, required_length: usize, actual_length: usize) -> Self {
        Self::new(
            field,
            FieldErrorKind::MinLength {
                required_length,
                actual_length,
            },
        )
    }

    /// Human readable message for this failure
    pub fn message(&self) -> String {
        match self.kind {
            FieldErrorKind::Required => format!("{} is required", self.field),
            FieldErrorKind::MinLength {
                required_length,
                actual_length,
            } => format!(
                "{} must be at least {} characters (got {})",
                self.field, required_length, actual_length
            ),
            FieldErrorKind::Email => format!("{} must be a valid email address", self.field),
            FieldErrorKind::UsernameTaken => "username is already taken".to_string(),
            FieldErrorKind::LookupUnavailable => {
                "username availability could not be verified".to_string()
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
