//! Driving port backing the administrative directory views.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{DirectoryMember, Error};

/// Dashboard counters over the directory and accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DirectoryStats {
    pub members: u64,
    pub linked_members: u64,
    pub unlinked_members: u64,
    pub accounts: u64,
}

/// Domain use-case port for administrators.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryAdminQuery: Send + Sync {
    /// Members without an account, ordered by first name then id.
    async fn list_unlinked(&self) -> Result<Vec<DirectoryMember>, Error>;

    /// Current dashboard counters.
    async fn stats(&self) -> Result<DirectoryStats, Error>;
}
