//! In-process store implementing the directory and account repositories.
//!
//! Used when no database is configured and by integration tests. It enforces
//! the same guarantees as the PostgreSQL schema: unique account emails and a
//! link update that only applies to unlinked members.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, DirectoryCounts, DirectoryRepository,
    DirectoryRepositoryError, LinkOutcome,
};
use crate::domain::{
    Account, AccountId, DirectoryMember, DirectoryMemberId, EmailAddress, NewAccount, OrgLevel,
};

#[derive(Debug, Default)]
struct State {
    members: BTreeMap<DirectoryMemberId, DirectoryMember>,
    accounts: Vec<Account>,
}

/// Shared in-memory backing store.
///
/// # Examples
/// ```
/// use coaching_backend::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::default();
/// # let _ = store;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    /// Seed the store with roster entries, replacing entries with equal ids.
    pub fn with_members(self, members: impl IntoIterator<Item = DirectoryMember>) -> Self {
        let mut state = self.state.into_inner();
        state
            .members
            .extend(members.into_iter().map(|member| (member.id, member)));
        Self {
            state: RwLock::new(state),
        }
    }

    /// Seed the store with existing accounts.
    pub fn with_accounts(self, accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut state = self.state.into_inner();
        state.accounts.extend(accounts);
        Self {
            state: RwLock::new(state),
        }
    }

    /// Add or replace a roster entry.
    pub async fn upsert_member(&self, member: DirectoryMember) {
        self.state.write().await.members.insert(member.id, member);
    }

    /// Snapshot of every account currently stored.
    pub async fn accounts(&self) -> Vec<Account> {
        self.state.read().await.accounts.clone()
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        id: DirectoryMemberId,
    ) -> Result<Option<DirectoryMember>, DirectoryRepositoryError> {
        Ok(self.state.read().await.members.get(&id).cloned())
    }

    async fn find_by_org_level(
        &self,
        org_level: &OrgLevel,
    ) -> Result<Vec<DirectoryMember>, DirectoryRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .members
            .values()
            .filter(|member| member.org_level_2.as_ref() == Some(org_level))
            .cloned()
            .collect())
    }

    async fn list_unlinked(&self) -> Result<Vec<DirectoryMember>, DirectoryRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .members
            .values()
            .filter(|member| !member.has_account())
            .cloned()
            .collect())
    }

    async fn link_account(
        &self,
        id: DirectoryMemberId,
        account_id: AccountId,
    ) -> Result<LinkOutcome, DirectoryRepositoryError> {
        let mut state = self.state.write().await;
        let Some(member) = state.members.get_mut(&id) else {
            return Ok(LinkOutcome::MemberMissing);
        };
        if member.has_account() {
            return Ok(LinkOutcome::AlreadyLinked);
        }
        member.user_id = Some(account_id);
        Ok(LinkOutcome::Linked)
    }

    async fn counts(&self) -> Result<DirectoryCounts, DirectoryRepositoryError> {
        let state = self.state.read().await;
        let linked = state.members.values().filter(|m| m.has_account()).count();
        Ok(DirectoryCounts {
            members: state.members.len() as u64,
            linked_members: linked as u64,
        })
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn create(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut state = self.state.write().await;
        if state.accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountRepositoryError::duplicate_email(
                account.email.to_string(),
            ));
        }
        let created = account.clone().into_account(AccountId::random());
        state.accounts.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let state = self.state.read().await;
        Ok(state.accounts.iter().find(|a| &a.id == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let state = self.state.read().await;
        Ok(state.accounts.iter().find(|a| &a.email == email).cloned())
    }

    async fn count(&self) -> Result<u64, AccountRepositoryError> {
        Ok(self.state.read().await.accounts.len() as u64)
    }
}
