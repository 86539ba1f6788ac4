//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `AccountProvisioning`, `LoginService`) are what
//! inbound adapters call. Driven ports (`*Repository`, `PasswordHasher`) are
//! what domain services call and outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod account_provisioning;
mod account_query;
mod account_repository;
mod directory_admin_query;
mod directory_repository;
mod login_service;
mod password_hasher;
mod team_directory_query;

#[cfg(test)]
pub use account_provisioning::MockAccountProvisioning;
pub use account_provisioning::{AccountProvisioning, ProvisioningError, ProvisioningTally};
#[cfg(test)]
pub use account_query::MockAccountQuery;
pub use account_query::AccountQuery;
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use directory_admin_query::MockDirectoryAdminQuery;
pub use directory_admin_query::{DirectoryAdminQuery, DirectoryStats};
#[cfg(test)]
pub use directory_repository::MockDirectoryRepository;
pub use directory_repository::{
    DirectoryCounts, DirectoryRepository, DirectoryRepositoryError, LinkOutcome,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use team_directory_query::MockTeamDirectoryQuery;
pub use team_directory_query::TeamDirectoryQuery;
