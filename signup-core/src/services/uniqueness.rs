//! Username uniqueness probe
//!
//! Wraps a [`UsernameLookup`] and turns its answer into a field error.
//! A failed or timed-out lookup is handled by the [`FailurePolicy`]: by
//! default the check passes so registration is never blocked on the
//! directory being down.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Field, FieldError, FieldErrorKind};
use crate::ports::UsernameLookup;

/// Default bound on a single lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(5000);

/// What a lookup failure means for the username field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    /// Treat an unanswered lookup as a pass
    #[default]
    FailOpen,
    /// Report `lookupUnavailable` on the username field
    FailClosed,
}

/// Raw outcome of one probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Available,
    Taken { matches: usize },
    Unverified { reason: String },
}

/// Asynchronous username check against an injected lookup
#[derive(Clone)]
pub struct UniquenessProbe {
    lookup: Arc<dyn UsernameLookup>,
    policy: FailurePolicy,
    timeout: Duration,
}

impl UniquenessProbe {
    /// Fail-open probe with the default timeout
    pub fn new(lookup: Arc<dyn UsernameLookup>) -> Self {
        Self {
            lookup,
            policy: FailurePolicy::default(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn lookup_name(&self) -> &str {
        self.lookup.name()
    }

    /// Run exactly one lookup for `username`
    ///
    /// An empty username is never looked up; it reports `Available` since
    /// the `required` rule owns that case.
    pub async fn check(&self, username: &str) -> ProbeOutcome {
        if username.is_empty() {
            return ProbeOutcome::Available;
        }

        debug!(lookup = self.lookup.name(), username, "checking username availability");

        match tokio::time::timeout(self.timeout, self.lookup.lookup_username(username)).await {
            Ok(Ok(accounts)) if accounts.is_empty() => ProbeOutcome::Available,
            Ok(Ok(accounts)) => ProbeOutcome::Taken {
                matches: accounts.len(),
            },
            Ok(Err(e)) => {
                warn!(
                    lookup = self.lookup.name(),
                    policy = ?self.policy,
                    error = %e,
                    "username lookup failed"
                );
                ProbeOutcome::Unverified {
                    reason: e.to_string(),
                }
            }
            Err(_) => {
                warn!(
                    lookup = self.lookup.name(),
                    policy = ?self.policy,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "username lookup timed out"
                );
                ProbeOutcome::Unverified {
                    reason: format!("lookup timed out after {} ms", self.timeout.as_millis()),
                }
            }
        }
    }

    /// Field error for an outcome under this probe's policy
    pub fn field_error(&self, outcome: &ProbeOutcome) -> Option<FieldError> {
        match outcome {
            ProbeOutcome::Available => None,
            ProbeOutcome::Taken { .. } => {
                Some(FieldError::new(Field::Username, FieldErrorKind::UsernameTaken))
            }
            ProbeOutcome::Unverified { .. } => match self.policy {
                FailurePolicy::FailOpen => None,
                FailurePolicy::FailClosed => Some(FieldError::new(
                    Field::Username,
                    FieldErrorKind::LookupUnavailable,
                )),
            },
        }
    }

    /// Check `username` and report `usernameTaken` when it is registered
    pub async fn validate(&self, username: &str) -> Option<FieldError> {
        let outcome = self.check(username).await;
        self.field_error(&outcome)
    }
}
