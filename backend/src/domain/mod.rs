//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed entities for the team directory and
//! accounts, the services implementing the provisioning and team lookup
//! use-cases, and the ports that separate them from HTTP and storage.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - DirectoryMember, Account and their value types.
//! - TeamDirectoryService, AccountProvisioningService, PasswordLoginService,
//!   AccountQueryService, DirectoryAdminService: driving-port implementations.

pub mod account;
pub mod auth;
pub mod authentication;
pub mod directory;
pub mod directory_admin;
pub mod error;
pub mod ports;
pub mod provisioning;
pub mod team_directory;
pub mod trace_id;

pub use self::account::{
    Account, AccountId, HashedPassword, NewAccount, PiProfile, Role, UnknownRole,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::authentication::{AccountQueryService, PasswordLoginService};
pub use self::directory::{
    DirectoryMember, DirectoryMemberId, DirectoryValidationError, EmailAddress, OrgLevel,
    sort_for_display,
};
pub use self::directory_admin::DirectoryAdminService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::provisioning::{AccountProvisioningService, DEFAULT_INITIAL_PASSWORD};
pub use self::team_directory::TeamDirectoryService;
pub use self::trace_id::TraceId;

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use coaching_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("no such member"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
