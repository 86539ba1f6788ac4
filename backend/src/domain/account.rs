//! Account data model.
//!
//! An [`Account`] is an authenticatable principal. Accounts are either created
//! out of band (administrators) or provisioned from a
//! [`crate::domain::DirectoryMember`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{EmailAddress, OrgLevel};

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AccountId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error raised when a stored role label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown account role: {0}")]
pub struct UnknownRole(pub String);

/// Authorisation role carried by an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular team member.
    #[default]
    Member,
    /// Administrator with access to the directory back office.
    Admin,
}

impl Role {
    /// Storage label for the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }

    /// Whether the role grants access to administrative operations.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// PHC-formatted password hash.
///
/// `Debug` output is redacted and the value is never serialised.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap an encoded PHC string produced by a
    /// [`crate::domain::ports::PasswordHasher`].
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(<redacted>)")
    }
}

/// Behavioural-assessment attributes shown on the account profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PiProfile {
    pub reference_profile: Option<String>,
    pub pattern: Option<String>,
    pub dominance: Option<f64>,
    pub extraversion: Option<f64>,
    pub patience: Option<f64>,
    pub formality: Option<f64>,
}

impl PiProfile {
    /// Whether every attribute is absent.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// An authenticatable principal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: EmailAddress,
    pub role: Role,
    #[serde(skip)]
    pub password_hash: HashedPassword,
    pub org_level_2: Option<OrgLevel>,
    pub profile: Option<PiProfile>,
}

/// Values required to create an account; storage assigns the identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub email: EmailAddress,
    pub role: Role,
    pub password_hash: HashedPassword,
    pub org_level_2: Option<OrgLevel>,
}

impl NewAccount {
    /// Materialise the account once storage has chosen an identifier.
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            password_hash: self.password_hash,
            org_level_2: self.org_level_2,
            profile: None,
        }
    }
}
