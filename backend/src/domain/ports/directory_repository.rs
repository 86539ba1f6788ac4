//! Driven port for reading the team directory and linking accounts.
//!
//! The directory is imported from an external roster; this system only reads
//! it, apart from the one-way `unlinked -> linked` transition performed by
//! [`DirectoryRepository::link_account`].

use async_trait::async_trait;

use crate::domain::{AccountId, DirectoryMember, DirectoryMemberId, OrgLevel};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by directory repository adapters.
    pub enum DirectoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "directory repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "directory repository query failed: {message}",
    }
}

/// Result of a conditional link update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The member was unlinked and now references the account.
    Linked,
    /// Another caller linked the member first; nothing changed.
    AlreadyLinked,
    /// No member with the identifier exists.
    MemberMissing,
}

/// Aggregate counts over the directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryCounts {
    pub members: u64,
    pub linked_members: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Fetch a single member by identifier.
    async fn find_by_id(
        &self,
        id: DirectoryMemberId,
    ) -> Result<Option<DirectoryMember>, DirectoryRepositoryError>;

    /// Every member whose grouping key equals `org_level`, in any order.
    async fn find_by_org_level(
        &self,
        org_level: &OrgLevel,
    ) -> Result<Vec<DirectoryMember>, DirectoryRepositoryError>;

    /// Every member without a linked account, in any order.
    async fn list_unlinked(&self) -> Result<Vec<DirectoryMember>, DirectoryRepositoryError>;

    /// Record `account_id` on the member only if it is still unlinked.
    async fn link_account(
        &self,
        id: DirectoryMemberId,
        account_id: AccountId,
    ) -> Result<LinkOutcome, DirectoryRepositoryError>;

    /// Count members and linked members.
    async fn counts(&self) -> Result<DirectoryCounts, DirectoryRepositoryError>;
}

impl From<DirectoryRepositoryError> for crate::domain::Error {
    fn from(error: DirectoryRepositoryError) -> Self {
        match error {
            DirectoryRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("directory repository unavailable: {message}"))
            }
            DirectoryRepositoryError::Query { message } => {
                Self::internal(format!("directory repository error: {message}"))
            }
        }
    }
}
