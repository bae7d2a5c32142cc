//! In-memory username lookup
//!
//! Holds a fixed list of registered accounts. Used when no user directory
//! URL is configured but a list of reserved usernames is, and by tests.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::ExistingAccount;
use crate::ports::UsernameLookup;

/// Username lookup over a fixed set of accounts
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsernameLookup {
    accounts: Vec<ExistingAccount>,
}

impl InMemoryUsernameLookup {
    pub fn new(accounts: Vec<ExistingAccount>) -> Self {
        Self { accounts }
    }

    /// Build from bare usernames, numbering IDs from 1
    pub fn from_usernames<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accounts = usernames
            .into_iter()
            .enumerate()
            .map(|(i, name)| ExistingAccount::new((i + 1).to_string(), name))
            .collect();
        Self { accounts }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl UsernameLookup for InMemoryUsernameLookup {
    fn name(&self) -> &str {
        "memory"
    }

    // Exact, case-sensitive match like a `?username=` query
    async fn lookup_username(&self, username: &str) -> Result<Vec<ExistingAccount>> {
        Ok(self
            .accounts
            .iter()
            .filter(|account| account.username == username)
            .cloned()
            .collect())
    }
}
