//! Driven port for account persistence.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, EmailAddress, NewAccount};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// An account with the same email already exists.
        DuplicateEmail { email: String } => "an account with email {email} already exists",
    }
}

/// Port for storing and loading accounts.
///
/// Email uniqueness is enforced by storage; [`AccountRepository::create`]
/// reports a violation as [`AccountRepositoryError::DuplicateEmail`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account and return it with its assigned identifier.
    async fn create(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account by exact email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Total number of accounts.
    async fn count(&self) -> Result<u64, AccountRepositoryError>;
}

impl From<AccountRepositoryError> for crate::domain::Error {
    fn from(error: AccountRepositoryError) -> Self {
        match error {
            AccountRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Self::internal(format!("account repository error: {message}"))
            }
            AccountRepositoryError::DuplicateEmail { email } => {
                Self::conflict(format!("an account with email {email} already exists"))
            }
        }
    }
}
