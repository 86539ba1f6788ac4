//! Driving port for provisioning accounts from directory members.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{Account, DirectoryMember, DirectoryMemberId};

use super::define_port_error;

define_port_error! {
    /// Outcomes that prevented an account from being provisioned.
    pub enum ProvisioningError {
        /// The member already has a linked account; nothing was created.
        AlreadyProvisioned { member_id: DirectoryMemberId } =>
            "directory member {member_id} already has an account",
        /// No member exists with the identifier.
        MemberNotFound { member_id: DirectoryMemberId } =>
            "directory member {member_id} was not found",
        /// Storage rejected the new account (for example a duplicate email).
        AccountCreationFailed { message: String } => "account creation failed: {message}",
        /// Storage could not be reached while reading or linking.
        Unavailable { message: String } => "provisioning storage unavailable: {message}",
    }
}

/// Counts reported by a batch provisioning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisioningTally {
    pub created_count: u64,
    pub skipped_count: u64,
}

/// Domain use-case port for account provisioning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountProvisioning: Send + Sync {
    /// Create exactly one account for `member` and link it.
    async fn provision_account(
        &self,
        member: &DirectoryMember,
    ) -> Result<Account, ProvisioningError>;

    /// Load the member by identifier, then behave as
    /// [`AccountProvisioning::provision_account`].
    async fn provision_member(
        &self,
        member_id: DirectoryMemberId,
    ) -> Result<Account, ProvisioningError>;

    /// Best-effort sequential provisioning of every selected member.
    async fn provision_selected(&self, selection: &BTreeSet<DirectoryMemberId>)
    -> ProvisioningTally;
}
