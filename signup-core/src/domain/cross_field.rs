//! Cross-field validation outcome
//!
//! A fixed record of boolean flags keyed by [`CrossFieldFlag`]. The JSON
//! form only carries the flags that fired, e.g.
//! `{"emailRequired": true, "requiredContact": true}`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rules whose outcome depends on more than one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CrossFieldFlag {
    PasswordMismatch,
    EmailRequired,
    PhoneRequired,
    RequiredContact,
    NoContactProvided,
}

impl CrossFieldFlag {
    pub const ALL: [CrossFieldFlag; 5] = [
        CrossFieldFlag::PasswordMismatch,
        CrossFieldFlag::EmailRequired,
        CrossFieldFlag::PhoneRequired,
        CrossFieldFlag::RequiredContact,
        CrossFieldFlag::NoContactProvided,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CrossFieldFlag::PasswordMismatch => "passwordMismatch",
            CrossFieldFlag::EmailRequired => "emailRequired",
            CrossFieldFlag::PhoneRequired => "phoneRequired",
            CrossFieldFlag::RequiredContact => "requiredContact",
            CrossFieldFlag::NoContactProvided => "noContactProvided",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CrossFieldFlag::PasswordMismatch => "passwords do not match",
            CrossFieldFlag::EmailRequired => "an email address is required to be contacted by email",
            CrossFieldFlag::PhoneRequired => "a phone number is required to be contacted by phone",
            CrossFieldFlag::RequiredContact => "the preferred contact method is missing its details",
            CrossFieldFlag::NoContactProvided => "no phone number was provided",
        }
    }
}

impl fmt::Display for CrossFieldFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Flags raised by the cross-field rule; empty when the snapshot is consistent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossFieldErrors {
    #[serde(default, skip_serializing_if = "is_false")]
    pub password_mismatch: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub email_required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub phone_required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required_contact: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_contact_provided: bool,
}

impl CrossFieldErrors {
    pub fn set(&mut self, flag: CrossFieldFlag) {
        *self.slot(flag) = true;
    }

    pub fn contains(&self, flag: CrossFieldFlag) -> bool {
        match flag {
            CrossFieldFlag::PasswordMismatch => self.password_mismatch,
            CrossFieldFlag::EmailRequired => self.email_required,
            CrossFieldFlag::PhoneRequired => self.phone_required,
            CrossFieldFlag::RequiredContact => self.required_contact,
            CrossFieldFlag::NoContactProvided => self.no_contact_provided,
        }
    }

    pub fn is_empty(&self) -> bool {
        !CrossFieldFlag::ALL.iter().any(|flag| self.contains(*flag))
    }

    /// Fired flags in declaration order
    pub fn flags(&self) -> impl Iterator<Item = CrossFieldFlag> + '_ {
        CrossFieldFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }

    /// `None` when nothing fired, mirroring a form validator's `null`
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    fn slot(&mut self, flag: CrossFieldFlag) -> &mut bool {
        match flag {
            CrossFieldFlag::PasswordMismatch => &mut self.password_mismatch,
            CrossFieldFlag::EmailRequired => &mut self.email_required,
            CrossFieldFlag::PhoneRequired => &mut self.phone_required,
            CrossFieldFlag::RequiredContact => &mut self.required_contact,
            CrossFieldFlag::NoContactProvided => &mut self.no_contact_provided,
        }
    }
}

impl FromIterator<CrossFieldFlag> for CrossFieldErrors {
    fn from_iter<I: IntoIterator<Item = CrossFieldFlag>>(iter: I) -> Self {
        let mut errors = Self::default();
        for flag in iter {
            errors.set(flag);
        }
        errors
    }
}
