//! Driving port for loading the requesting account.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, Error};

/// Domain use-case port for account lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Fetch an account by identifier; `Ok(None)` when it no longer exists.
    async fn find_account(&self, id: &AccountId) -> Result<Option<Account>, Error>;
}
