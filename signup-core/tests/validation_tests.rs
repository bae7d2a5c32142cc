//! Integration tests for full registration validation passes
//!
//! The username lookup is mocked at the trait level; everything else runs
//! through the public API exactly as a host form would use it.
//!
//! Run with: cargo test --test validation_tests -- --nocapture

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use signup_core::adapters::memory::InMemoryUsernameLookup;
use signup_core::domain::result::{Error, Result};
use signup_core::ports::UsernameLookup;
use signup_core::services::{
    FailurePolicy, RegistrationValidator, UniquenessProbe, ValidationRules,
};
use signup_core::{
    CrossFieldFlag, ExistingAccount, Field, FieldError, FieldErrorKind, PreferredContact,
    RegistrationInput, UsernameCheck,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Lookup that records how often it was called
struct RecordingLookup {
    taken: Vec<String>,
    calls: AtomicUsize,
}

impl RecordingLookup {
    fn new(taken: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            taken: taken.iter().map(|s| s.to_string()).collect(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UsernameLookup for RecordingLookup {
    fn name(&self) -> &str {
        "recording"
    }

    async fn lookup_username(&self, username: &str) -> Result<Vec<ExistingAccount>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .taken
            .iter()
            .filter(|name| name.as_str() == username)
            .map(|name| ExistingAccount::new("1", name.clone()))
            .collect())
    }
}

/// Lookup standing in for an unreachable directory
struct UnreachableLookup;

#[async_trait]
impl UsernameLookup for UnreachableLookup {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn lookup_username(&self, _username: &str) -> Result<Vec<ExistingAccount>> {
        Err(Error::lookup("Unable to connect to user directory"))
    }
}

fn validator_with(lookup: Arc<dyn UsernameLookup>) -> RegistrationValidator {
    RegistrationValidator::new(ValidationRules::default()).with_probe(UniquenessProbe::new(lookup))
}

fn complete_input() -> RegistrationInput {
    RegistrationInput::new("newcomer", "newcomer@example.com")
        .with_password("s3cret!")
        .with_phone_number("+44 20 7946 0000")
}

// ============================================================================
// End-to-end
// ============================================================================

#[tokio::test]
async fn test_short_username_with_missing_email() {
    let lookup = RecordingLookup::new(&[]);
    let validator = validator_with(lookup.clone());

    let input: RegistrationInput = serde_json::from_value(serde_json::json!({
        "username": "ab",
        "email": "",
        "password": "pw1",
        "confirmPassword": "pw1",
        "phoneNumber": "",
        "preferredContact": "email"
    }))
    .unwrap();

    let report = validator.validate(&input).await;

    assert_eq!(
        report.error_for(Field::Username),
        Some(&FieldError::min_length(Field::Username, 3, 2))
    );
    assert_eq!(
        serde_json::to_value(report.cross_field).unwrap(),
        serde_json::json!({ "emailRequired": true, "requiredContact": true })
    );
    assert_eq!(report.username_check, UsernameCheck::Skipped);
    assert_eq!(lookup.calls(), 0);
    assert!(!report.valid);
}

#[tokio::test]
async fn test_complete_registration_is_valid() {
    let lookup = RecordingLookup::new(&["someone_else"]);
    let validator = validator_with(lookup.clone());

    let report = validator.validate(&complete_input()).await;

    assert!(report.valid, "unexpected report: {:?}", report);
    assert!(report.field_errors.is_empty());
    assert!(report.cross_field.is_empty());
    assert!(report.cross_field.into_option().is_none());
    assert_eq!(report.username_check, UsernameCheck::Passed);
    assert_eq!(lookup.calls(), 1);
}

#[tokio::test]
async fn test_taken_username_blocks_registration() {
    let validator = validator_with(RecordingLookup::new(&["newcomer"]));

    let report = validator.validate(&complete_input()).await;

    assert!(!report.valid);
    assert_eq!(report.username_check, UsernameCheck::Taken);
    assert_eq!(
        report.error_for(Field::Username).map(|e| e.kind),
        Some(FieldErrorKind::UsernameTaken)
    );
}

#[tokio::test]
async fn test_unreachable_directory_does_not_block() {
    let validator = validator_with(Arc::new(UnreachableLookup));

    let report = validator.validate(&complete_input()).await;

    assert!(report.valid);
    assert_eq!(report.username_check, UsernameCheck::Unverified);
    assert!(validator
        .validate_username_uniqueness("newcomer")
        .await
        .is_none());
}

#[tokio::test]
async fn test_unreachable_directory_fail_closed() {
    let probe = UniquenessProbe::new(Arc::new(UnreachableLookup))
        .with_policy(FailurePolicy::FailClosed);
    let validator = RegistrationValidator::new(ValidationRules::default()).with_probe(probe);

    let report = validator.validate(&complete_input()).await;

    assert!(!report.valid);
    assert_eq!(report.username_check, UsernameCheck::Unverified);
    assert_eq!(
        report.error_for(Field::Username).map(|e| e.kind),
        Some(FieldErrorKind::LookupUnavailable)
    );
}

#[tokio::test]
async fn test_field_and_cross_field_errors_reported_together() {
    let validator = validator_with(Arc::new(InMemoryUsernameLookup::default()));

    let input = RegistrationInput::new("validname", "broken-email")
        .with_password("longenough")
        .with_confirm_password("different")
        .with_preferred_contact(PreferredContact::Phone);

    let report = validator.validate(&input).await;

    assert_eq!(
        report.error_for(Field::Email).map(|e| e.kind),
        Some(FieldErrorKind::Email)
    );
    let flags: Vec<_> = report.cross_field.flags().collect();
    assert_eq!(
        flags,
        vec![
            CrossFieldFlag::PasswordMismatch,
            CrossFieldFlag::PhoneRequired,
            CrossFieldFlag::RequiredContact,
            CrossFieldFlag::NoContactProvided,
        ]
    );
    // Username passed its own checks, so the lookup still ran
    assert_eq!(report.username_check, UsernameCheck::Passed);
}

// ============================================================================
// Cross-field properties over a spread of snapshots
// ============================================================================

fn snapshots() -> Vec<RegistrationInput> {
    let usernames = ["", "ab", "alice"];
    let emails = ["", " ", "a@b.io"];
    let passwords = [("", ""), ("pw", "pw"), ("pw", "PW"), ("", "x")];
    let phones = ["", "555-0100"];
    let contacts = [PreferredContact::Email, PreferredContact::Phone];

    let mut out = Vec::new();
    for username in usernames {
        for email in emails {
            for (password, confirm) in passwords {
                for phone in phones {
                    for contact in contacts {
                        out.push(RegistrationInput {
                            username: username.to_string(),
                            email: email.to_string(),
                            password: password.to_string(),
                            confirm_password: confirm.to_string(),
                            phone_number: phone.to_string(),
                            preferred_contact: contact,
                        });
                    }
                }
            }
        }
    }
    out
}

#[test]
fn test_password_mismatch_tracks_equality() {
    let validator = RegistrationValidator::default();
    for input in snapshots() {
        let errors = validator.validate_cross_field(&input);
        assert_eq!(
            errors.contains(CrossFieldFlag::PasswordMismatch),
            input.password != input.confirm_password,
            "snapshot: {:?}",
            input
        );
    }
}

#[test]
fn test_contact_flags_follow_preference() {
    let validator = RegistrationValidator::default();
    for input in snapshots() {
        let errors = validator.validate_cross_field(&input);
        let email_blank = input.email.is_empty();
        let phone_blank = input.phone_number.is_empty();

        match input.preferred_contact {
            PreferredContact::Email => {
                assert_eq!(errors.contains(CrossFieldFlag::EmailRequired), email_blank);
                assert_eq!(errors.contains(CrossFieldFlag::RequiredContact), email_blank);
                assert!(!errors.contains(CrossFieldFlag::PhoneRequired));
                assert!(!errors.contains(CrossFieldFlag::NoContactProvided));
            }
            PreferredContact::Phone => {
                assert_eq!(errors.contains(CrossFieldFlag::PhoneRequired), phone_blank);
                assert_eq!(errors.contains(CrossFieldFlag::RequiredContact), phone_blank);
                assert_eq!(errors.contains(CrossFieldFlag::NoContactProvided), phone_blank);
                assert!(!errors.contains(CrossFieldFlag::EmailRequired));
            }
        }
    }
}

#[test]
fn test_cross_field_is_idempotent() {
    let validator = RegistrationValidator::default();
    for input in snapshots() {
        let snapshot = input.clone();
        let first = validator.validate_cross_field(&input);
        let second = validator.validate_cross_field(&input);
        assert_eq!(first, second);
        assert_eq!(input, snapshot);
    }
}
