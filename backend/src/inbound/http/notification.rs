//! Operator-facing notifications for provisioning actions.
//!
//! The provisioner returns structured outcomes; this module alone decides how
//! they are phrased for display.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ProvisioningTally;
use crate::domain::{Account, DirectoryMemberId};

/// Display severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Danger,
}

/// Short message summarising the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub body: String,
}

impl Notification {
    fn new(level: NotificationLevel, title: &str, body: String) -> Self {
        Self {
            level,
            title: title.to_owned(),
            body,
        }
    }

    /// An account was created for a single member.
    pub fn account_created(account: &Account) -> Self {
        Self::new(
            NotificationLevel::Success,
            "Account created",
            format!("Created an account for {} <{}>.", account.name, account.email),
        )
    }

    /// The member was already linked; nothing changed.
    pub fn already_provisioned(member_id: DirectoryMemberId) -> Self {
        Self::new(
            NotificationLevel::Warning,
            "Account already exists",
            format!("Directory member {member_id} already has an account."),
        )
    }

    /// Summary of a batch run.
    pub fn batch(tally: ProvisioningTally) -> Self {
        let ProvisioningTally {
            created_count,
            skipped_count,
        } = tally;
        let body = format!("Created {created_count} account(s), skipped {skipped_count}.");
        match (created_count, skipped_count) {
            (0, 0) => Self::new(
                NotificationLevel::Warning,
                "No members selected",
                "Select at least one directory member.".to_owned(),
            ),
            (_, 0) => Self::new(NotificationLevel::Success, "Accounts created", body),
            (0, _) => Self::new(NotificationLevel::Danger, "No accounts created", body),
            _ => Self::new(NotificationLevel::Warning, "Some members were skipped", body),
        }
    }
}

/// Batch provisioning response: the notification plus the raw counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchNotification {
    #[serde(flatten)]
    pub notification: Notification,
    pub created_count: u64,
    pub skipped_count: u64,
}

impl From<ProvisioningTally> for BatchNotification {
    fn from(tally: ProvisioningTally) -> Self {
        Self {
            notification: Notification::batch(tally),
            created_count: tally.created_count,
            skipped_count: tally.skipped_count,
        }
    }
}
