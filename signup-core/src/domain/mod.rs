//! Core domain entities
//!
//! The registration snapshot and the shapes of its validation outcomes.
//! These are pure data structures - no I/O or external dependencies.

mod account;
mod cross_field;
mod field_error;
mod registration;
mod report;
pub mod result;

pub use account::ExistingAccount;
pub use cross_field::{CrossFieldErrors, CrossFieldFlag};
pub use field_error::{FieldError, FieldErrorKind};
pub use registration::{Field, PreferredContact, RegistrationInput};
pub use report::{RegistrationReport, UsernameCheck};
