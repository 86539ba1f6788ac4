//! Read models for the administrative directory views.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AccountRepository, DirectoryAdminQuery, DirectoryRepository, DirectoryStats,
};
use crate::domain::{DirectoryMember, Error, sort_for_display};

/// Service implementing [`DirectoryAdminQuery`].
#[derive(Clone)]
pub struct DirectoryAdminService<D, A> {
    directory: Arc<D>,
    accounts: Arc<A>,
}

impl<D, A> DirectoryAdminService<D, A> {
    /// Create a new admin query service.
    pub fn new(directory: Arc<D>, accounts: Arc<A>) -> Self {
        Self {
            directory,
            accounts,
        }
    }
}

#[async_trait]
impl<D, A> DirectoryAdminQuery for DirectoryAdminService<D, A>
where
    D: DirectoryRepository,
    A: AccountRepository,
{
    async fn list_unlinked(&self) -> Result<Vec<DirectoryMember>, Error> {
        let mut members = self.directory.list_unlinked().await?;
        sort_for_display(&mut members);
        Ok(members)
    }

    async fn stats(&self) -> Result<DirectoryStats, Error> {
        let counts = self.directory.counts().await?;
        let accounts = self.accounts.count().await?;
        Ok(DirectoryStats {
            members: counts.members,
            linked_members: counts.linked_members,
            unlinked_members: counts.members.saturating_sub(counts.linked_members),
            accounts,
        })
    }
}
