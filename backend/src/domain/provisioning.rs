//! Account provisioning for directory members.
//!
//! Provisioning creates exactly one account for a roster entry that lacks
//! one and records the link on the entry. Two storage guarantees keep racing
//! callers safe: the unique index on account emails and the conditional
//! link update, which only touches members that are still unlinked.
//!
//! An account whose link was never recorded is adopted on the next attempt:
//! the email clash on create leads back to the existing account, which is
//! then linked instead of a fresh one.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountProvisioning, AccountRepository, AccountRepositoryError, DirectoryRepository,
    DirectoryRepositoryError, LinkOutcome, PasswordHasher, ProvisioningError, ProvisioningTally,
};
use crate::domain::{Account, DirectoryMember, DirectoryMemberId, NewAccount, Role};

/// Initial password assigned to provisioned accounts unless configured
/// otherwise.
pub const DEFAULT_INITIAL_PASSWORD: &str = "changeme";

/// Service implementing [`AccountProvisioning`].
#[derive(Clone)]
pub struct AccountProvisioningService<D, A, H> {
    directory: Arc<D>,
    accounts: Arc<A>,
    hasher: Arc<H>,
    initial_password: Arc<Zeroizing<String>>,
}

impl<D, A, H> AccountProvisioningService<D, A, H> {
    /// Create a service that assigns [`DEFAULT_INITIAL_PASSWORD`].
    pub fn new(directory: Arc<D>, accounts: Arc<A>, hasher: Arc<H>) -> Self {
        Self {
            directory,
            accounts,
            hasher,
            initial_password: Arc::new(Zeroizing::new(DEFAULT_INITIAL_PASSWORD.to_owned())),
        }
    }

    /// Replace the initial password given to new accounts.
    pub fn with_initial_password(mut self, password: impl Into<String>) -> Self {
        self.initial_password = Arc::new(Zeroizing::new(password.into()));
        self
    }
}

fn unavailable(error: DirectoryRepositoryError) -> ProvisioningError {
    ProvisioningError::unavailable(error.to_string())
}

impl<D, A, H> AccountProvisioningService<D, A, H>
where
    D: DirectoryRepository,
    A: AccountRepository,
    H: PasswordHasher,
{
    fn new_account_for(&self, member: &DirectoryMember) -> Result<NewAccount, ProvisioningError> {
        let password_hash = self
            .hasher
            .hash(self.initial_password.as_str())
            .map_err(|err| ProvisioningError::account_creation_failed(err.to_string()))?;

        Ok(NewAccount {
            name: member.full_name(),
            email: member.employee_email.clone(),
            role: Role::Member,
            password_hash,
            org_level_2: member.org_level_2.clone(),
        })
    }

    /// Resolve an email clash by reusing the account that already carries
    /// the member's email. An earlier attempt may have created it and then
    /// failed to record the link.
    async fn adopt_existing_account(
        &self,
        member: &DirectoryMember,
        email: String,
    ) -> Result<Account, ProvisioningError> {
        let duplicate = AccountRepositoryError::duplicate_email(email);
        match self.accounts.find_by_email(&member.employee_email).await {
            Ok(Some(existing)) => {
                warn!(
                    member_id = %member.id,
                    account_id = %existing.id,
                    "adopting existing account with the member's email"
                );
                Ok(existing)
            }
            Ok(None) => Err(ProvisioningError::account_creation_failed(
                duplicate.to_string(),
            )),
            Err(err) => {
                warn!(member_id = %member.id, error = %err, "existing account lookup failed");
                Err(ProvisioningError::account_creation_failed(
                    duplicate.to_string(),
                ))
            }
        }
    }

    async fn link(
        &self,
        member: &DirectoryMember,
        account: Account,
    ) -> Result<Account, ProvisioningError> {
        match self
            .directory
            .link_account(member.id, account.id)
            .await
            .map_err(unavailable)?
        {
            LinkOutcome::Linked => {
                info!(
                    member_id = %member.id,
                    account_id = %account.id,
                    "provisioned account for directory member"
                );
                Ok(account)
            }
            LinkOutcome::AlreadyLinked => {
                warn!(
                    member_id = %member.id,
                    orphaned_account_id = %account.id,
                    "directory member was linked concurrently"
                );
                Err(ProvisioningError::already_provisioned(member.id))
            }
            LinkOutcome::MemberMissing => {
                error!(
                    member_id = %member.id,
                    orphaned_account_id = %account.id,
                    "directory member disappeared before linking"
                );
                Err(ProvisioningError::member_not_found(member.id))
            }
        }
    }
}

#[async_trait]
impl<D, A, H> AccountProvisioning for AccountProvisioningService<D, A, H>
where
    D: DirectoryRepository,
    A: AccountRepository,
    H: PasswordHasher,
{
    async fn provision_account(
        &self,
        member: &DirectoryMember,
    ) -> Result<Account, ProvisioningError> {
        if member.has_account() {
            return Err(ProvisioningError::already_provisioned(member.id));
        }

        let new_account = self.new_account_for(member)?;
        let account = match self.accounts.create(&new_account).await {
            Ok(account) => account,
            Err(AccountRepositoryError::DuplicateEmail { email }) => {
                self.adopt_existing_account(member, email).await?
            }
            Err(err) => return Err(ProvisioningError::account_creation_failed(err.to_string())),
        };

        self.link(member, account).await
    }

    async fn provision_member(
        &self,
        member_id: DirectoryMemberId,
    ) -> Result<Account, ProvisioningError> {
        let member = self
            .directory
            .find_by_id(member_id)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| ProvisioningError::member_not_found(member_id))?;
        self.provision_account(&member).await
    }

    async fn provision_selected(
        &self,
        selection: &BTreeSet<DirectoryMemberId>,
    ) -> ProvisioningTally {
        let mut tally = ProvisioningTally::default();
        for member_id in selection {
            match self.provision_member(*member_id).await {
                Ok(_) => tally.created_count += 1,
                Err(
                    err @ (ProvisioningError::AlreadyProvisioned { .. }
                    | ProvisioningError::MemberNotFound { .. }),
                ) => {
                    debug!(member_id = %member_id, reason = %err, "skipping directory member");
                    tally.skipped_count += 1;
                }
                Err(err) => {
                    warn!(
                        member_id = %member_id,
                        error = %err,
                        "batch provisioning failed for member"
                    );
                    tally.skipped_count += 1;
                }
            }
        }
        info!(
            created = tally.created_count,
            skipped = tally.skipped_count,
            "batch provisioning finished"
        );
        tally
    }
}

#[cfg(test)]
#[path = "provisioning_tests.rs"]
mod tests;
