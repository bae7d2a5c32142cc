//! Registration validator
//!
//! Field-level rules, the cross-field rule and the optional asynchronous
//! username check, composed into one full-form pass.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    CrossFieldErrors, CrossFieldFlag, Field, FieldError, FieldErrorKind, PreferredContact,
    RegistrationInput, RegistrationReport, UsernameCheck,
};

use super::uniqueness::{ProbeOutcome, UniquenessProbe};

/// Longest address accepted by the email shape check
const EMAIL_MAX_LENGTH: usize = 254;
/// Longest local part (before `@`) accepted by the email shape check
const EMAIL_LOCAL_MAX_LENGTH: usize = 64;

fn email_pattern() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(concat!(
            r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        ))
        .expect("email pattern compiles")
    })
}

/// Whether `value` has the shape of an email address
pub fn is_email_shaped(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LENGTH {
        return false;
    }
    match value.split_once('@') {
        Some((local, _)) if !local.is_empty() && local.len() <= EMAIL_LOCAL_MAX_LENGTH => {
            email_pattern().is_match(value)
        }
        _ => false,
    }
}

/// Length limits applied by the field rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default = "default_username_min_length")]
    pub username_min_length: usize,
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

fn default_username_min_length() -> usize {
    3
}

fn default_password_min_length() -> usize {
    6
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            username_min_length: default_username_min_length(),
            password_min_length: default_password_min_length(),
        }
    }
}

/// Evaluate the cross-field rule against a snapshot
///
/// Every rule is checked; all that fire are reported together. Pure and
/// idempotent.
pub fn cross_field_errors(input: &RegistrationInput) -> CrossFieldErrors {
    let mut errors = CrossFieldErrors::default();

    if input.password != input.confirm_password {
        errors.set(CrossFieldFlag::PasswordMismatch);
    }

    // Only the empty string is missing; whitespace counts as a value
    let email_missing =
        input.preferred_contact == PreferredContact::Email && input.email.is_empty();
    let phone_missing =
        input.preferred_contact == PreferredContact::Phone && input.phone_number.is_empty();

    if email_missing {
        errors.set(CrossFieldFlag::EmailRequired);
    } else if phone_missing {
        errors.set(CrossFieldFlag::PhoneRequired);
    }

    // Aggregate flag for callers that only look at one key
    if email_missing || phone_missing {
        errors.set(CrossFieldFlag::RequiredContact);
    }

    // Phone-only; there is no email counterpart
    if phone_missing {
        errors.set(CrossFieldFlag::NoContactProvided);
    }

    errors
}

/// Validates registration snapshots
///
/// Cheap to share: holds the length rules and, optionally, a uniqueness
/// probe wrapping an injected username lookup.
#[derive(Clone, Default)]
pub struct RegistrationValidator {
    rules: ValidationRules,
    probe: Option<UniquenessProbe>,
}

impl RegistrationValidator {
    /// Validator without a username lookup
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules, probe: None }
    }

    /// Attach a uniqueness probe
    pub fn with_probe(mut self, probe: UniquenessProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn probe(&self) -> Option<&UniquenessProbe> {
        self.probe.as_ref()
    }

    /// Run the synchronous rules of one field; first failure wins
    pub fn validate_field(&self, field: Field, value: &str) -> Option<FieldError> {
        match field {
            Field::Username => required(field, value)
                .or_else(|| min_length(field, value, self.rules.username_min_length)),
            Field::Email => required(field, value).or_else(|| email(field, value)),
            Field::Password => required(field, value)
                .or_else(|| min_length(field, value, self.rules.password_min_length)),
            Field::ConfirmPassword => required(field, value),
            Field::PhoneNumber | Field::PreferredContact => None,
        }
    }

    /// Run the synchronous rules of every field, in form order
    pub fn validate_fields(&self, input: &RegistrationInput) -> Vec<FieldError> {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.validate_field(field, input.value(field)))
            .collect()
    }

    /// Evaluate the cross-field rule
    pub fn validate_cross_field(&self, input: &RegistrationInput) -> CrossFieldErrors {
        cross_field_errors(input)
    }

    /// Ask the lookup whether `username` is already registered
    ///
    /// Resolves to `None` when no probe is configured.
    pub async fn validate_username_uniqueness(&self, username: &str) -> Option<FieldError> {
        match &self.probe {
            Some(probe) => probe.validate(username).await,
            None => None,
        }
    }

    /// Validate a whole snapshot
    ///
    /// The username lookup only runs once the username passed its own
    /// synchronous checks.
    pub async fn validate(&self, input: &RegistrationInput) -> RegistrationReport {
        let mut field_errors = self.validate_fields(input);
        let cross_field = self.validate_cross_field(input);

        let username_check = if field_errors.iter().any(|e| e.field == Field::Username) {
            UsernameCheck::Skipped
        } else if let Some(probe) = &self.probe {
            let outcome = probe.check(&input.username).await;
            if let Some(error) = probe.field_error(&outcome) {
                field_errors.push(error);
            }
            match outcome {
                ProbeOutcome::Available => UsernameCheck::Passed,
                ProbeOutcome::Taken { .. } => UsernameCheck::Taken,
                ProbeOutcome::Unverified { .. } => UsernameCheck::Unverified,
            }
        } else {
            UsernameCheck::NotConfigured
        };

        let report = RegistrationReport::new(field_errors, cross_field, username_check);
        info!(
            valid = report.valid,
            field_errors = report.field_errors.len(),
            cross_field_flags = report.cross_field.flags().count(),
            username_check = report.username_check.label(),
            "registration validated"
        );
        report
    }
}

fn required(field: Field, value: &str) -> Option<FieldError> {
    value.is_empty().then(|| FieldError::required(field))
}

fn min_length(field: Field, value: &str, min: usize) -> Option<FieldError> {
    if value.is_empty() {
        return None;
    }
    let actual = value.chars().count();
    (actual < min).then(|| FieldError::min_length(field, min, actual))
}

fn email(field: Field, value: &str) -> Option<FieldError> {
    if value.is_empty() || is_email_shaped(value) {
        None
    } else {
        Some(FieldError::new(field, FieldErrorKind::Email))
    }
}
