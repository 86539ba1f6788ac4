//! Team directory data model.
//!
//! A [`DirectoryMember`] is one employee record imported from the external
//! roster. Members are grouped into teams by their `org_level_2` key and may
//! be linked to at most one [`crate::domain::Account`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AccountId;

/// Validation errors raised by the directory value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryValidationError {
    NonPositiveMemberId,
    EmptyEmail,
    MalformedEmail,
    EmptyOrgLevel,
}

impl fmt::Display for DirectoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMemberId => write!(f, "directory member id must be positive"),
            Self::EmptyEmail => write!(f, "email address must not be empty"),
            Self::MalformedEmail => write!(
                f,
                "email address must contain exactly one '@' between a local part and a domain",
            ),
            Self::EmptyOrgLevel => write!(f, "org level must not be empty"),
        }
    }
}

impl std::error::Error for DirectoryValidationError {}

/// Stable key of a directory record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "i64", into = "i64")]
#[schema(value_type = i64, example = 42)]
pub struct DirectoryMemberId(i64);

impl DirectoryMemberId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i64) -> Result<Self, DirectoryValidationError> {
        if raw <= 0 {
            return Err(DirectoryValidationError::NonPositiveMemberId);
        }
        Ok(Self(raw))
    }

    /// The raw identifier as stored.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for DirectoryMemberId {
    type Error = DirectoryValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DirectoryMemberId> for i64 {
    fn from(value: DirectoryMemberId) -> Self {
        value.0
    }
}

impl fmt::Display for DirectoryMemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DirectoryMemberId {
    type Err = DirectoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| DirectoryValidationError::NonPositiveMemberId)?;
        Self::new(raw)
    }
}

/// Email address shared by roster entries and accounts.
///
/// Stored trimmed; equality is exact on the trimmed value.
///
/// # Examples
/// ```
/// use coaching_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("  ada@example.com ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// assert!(EmailAddress::new("ada.example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ada@example.com")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl Into<String>) -> Result<Self, DirectoryValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectoryValidationError::EmptyEmail);
        }
        let mut parts = trimmed.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DirectoryValidationError::MalformedEmail);
        };
        if local.is_empty() || domain.is_empty() {
            return Err(DirectoryValidationError::MalformedEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DirectoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Second-level organisational grouping key used to compute teams.
///
/// Case-sensitive; stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "Engineering")]
pub struct OrgLevel(String);

impl OrgLevel {
    /// Validate and construct an [`OrgLevel`].
    pub fn new(raw: impl Into<String>) -> Result<Self, DirectoryValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectoryValidationError::EmptyOrgLevel);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Treat blank or absent storage values as "no grouping key".
    pub fn from_optional(raw: Option<String>) -> Option<Self> {
        raw.and_then(|value| Self::new(value).ok())
    }
}

impl AsRef<str> for OrgLevel {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OrgLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrgLevel {
    type Error = DirectoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrgLevel> for String {
    fn from(value: OrgLevel) -> Self {
        value.0
    }
}

/// One employee record from the external roster.
///
/// The only mutation the system performs is linking an unlinked member to a
/// freshly provisioned account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DirectoryMember {
    pub id: DirectoryMemberId,
    #[schema(example = "E-1001")]
    pub employee_number: String,
    pub employee_email: EmailAddress,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    pub job: Option<String>,
    pub job_code: Option<String>,
    pub org_level_2: Option<OrgLevel>,
    pub employment_status: Option<String>,
    pub user_id: Option<AccountId>,
}

impl DirectoryMember {
    /// Whether an account has already been provisioned for this member.
    pub fn has_account(&self) -> bool {
        self.user_id.is_some()
    }

    /// Display name used for accounts created from this record.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Order members by first name, then by id for a stable tie-break.
pub fn sort_for_display(members: &mut [DirectoryMember]) {
    members.sort_by(|a, b| {
        a.first_name
            .cmp(&b.first_name)
            .then_with(|| a.id.cmp(&b.id))
    });
}
