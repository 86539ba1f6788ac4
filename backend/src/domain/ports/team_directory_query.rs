//! Driving port for team directory lookups.
//!
//! Inbound adapters use this port to resolve the colleagues sharing a
//! grouping key without knowing how the directory is stored.

use async_trait::async_trait;

use crate::domain::{Account, DirectoryMember, Error};

/// Domain use-case port for resolving teams.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamDirectoryQuery: Send + Sync {
    /// Members sharing the account's `org_level_2`, excluding the account's
    /// own directory entry. Empty when the account has no grouping key.
    async fn resolve_team(&self, account: &Account) -> Result<Vec<DirectoryMember>, Error>;

    /// Members carrying the given grouping key. Blank input is rejected
    /// with [`crate::domain::ErrorCode::InvalidArgument`].
    async fn resolve_team_by_org_level(
        &self,
        org_level: &str,
    ) -> Result<Vec<DirectoryMember>, Error>;
}
