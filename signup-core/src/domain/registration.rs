//! Registration input snapshot

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::Error;

/// How the registrant wants to be contacted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredContact {
    #[default]
    Email,
    Phone,
}

impl PreferredContact {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredContact::Email => "email",
            PreferredContact::Phone => "phone",
        }
    }
}

impl fmt::Display for PreferredContact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferredContact {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(PreferredContact::Email),
            "phone" => Ok(PreferredContact::Phone),
            other => Err(Error::validation(format!(
                "Unknown contact preference: {} (expected email or phone)",
                other
            ))),
        }
    }
}

/// The six fields of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
    PhoneNumber,
    PreferredContact,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 6] = [
        Field::Username,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
        Field::PhoneNumber,
        Field::PreferredContact,
    ];

    /// Wire name of the field (matches the JSON key)
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::PhoneNumber => "phoneNumber",
            Field::PreferredContact => "preferredContact",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    /// Accepts the wire name as well as the kebab/snake spellings used on the command line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        Field::ALL
            .into_iter()
            .find(|field| field.as_str().to_lowercase() == normalized)
            .ok_or_else(|| Error::validation(format!("Unknown field: {}", s)))
    }
}

/// A fully-populated snapshot of the registration form
///
/// Built fresh by the caller for every validation pass and never mutated
/// by the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub preferred_contact: PreferredContact,
}

impl RegistrationInput {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Set both password fields to the same value
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        self.confirm_password = password.clone();
        self.password = password;
        self
    }

    pub fn with_confirm_password(mut self, confirm_password: impl Into<String>) -> Self {
        self.confirm_password = confirm_password.into();
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = phone_number.into();
        self
    }

    pub fn with_preferred_contact(mut self, preferred_contact: PreferredContact) -> Self {
        self.preferred_contact = preferred_contact;
        self
    }

    /// Raw string value of a field
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::PhoneNumber => &self.phone_number,
            Field::PreferredContact => self.preferred_contact.as_str(),
        }
    }
}
