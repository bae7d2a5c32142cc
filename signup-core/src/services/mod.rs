//! Service layer - validation orchestration
//!
//! Services combine the domain rules with the lookup port. Each service
//! focuses on one part of a validation pass.

mod supersede;
mod uniqueness;
mod validation;

pub use supersede::{SupersedeGuard, Ticket};
pub use uniqueness::{FailurePolicy, ProbeOutcome, UniquenessProbe, DEFAULT_LOOKUP_TIMEOUT};
pub use validation::{cross_field_errors, is_email_shaped, RegistrationValidator, ValidationRules};
