//! Username lookup port
//!
//! Defines the capability the uniqueness probe consults to find accounts
//! already registered under a username (HTTP endpoint, in-memory set, etc.)

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::ExistingAccount;

/// Username lookup capability
///
/// Implementations return every account registered under `username`.
/// An empty list means the name is free. Transport failures are returned
/// as errors; it is up to the caller to decide what an error means.
#[async_trait]
pub trait UsernameLookup: Send + Sync {
    /// Lookup name used in logs (e.g., "http", "memory")
    fn name(&self) -> &str;

    /// Fetch accounts registered under `username`
    async fn lookup_username(&self, username: &str) -> Result<Vec<ExistingAccount>>;
}
