//! Existing account returned by a username lookup

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// An already-registered account matching a lookup
///
/// Only the number of matches matters to the uniqueness probe; the fields
/// are kept so callers can report who holds the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingAccount {
    /// Account ID (lookup services return numbers or strings, we accept both)
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl ExistingAccount {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Deserialize ID that can be number or string
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}
