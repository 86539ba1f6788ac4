//! Password authentication and account lookups.
//!
//! [`PasswordLoginService`] verifies credentials against stored Argon2 hashes.
//! Unknown emails and wrong passwords are indistinguishable to callers.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{AccountQuery, AccountRepository, LoginService, PasswordHasher};
use crate::domain::{Account, AccountId, Error, LoginCredentials};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Login service backed by the account repository and a password hasher.
#[derive(Clone)]
pub struct PasswordLoginService<A, H> {
    accounts: Arc<A>,
    hasher: Arc<H>,
}

impl<A, H> PasswordLoginService<A, H> {
    /// Create a new login service.
    pub fn new(accounts: Arc<A>, hasher: Arc<H>) -> Self {
        Self { accounts, hasher }
    }
}

#[async_trait]
impl<A, H> LoginService for PasswordLoginService<A, H>
where
    A: AccountRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccountId, Error> {
        let Some(account) = self.accounts.find_by_email(credentials.email()).await? else {
            debug!("login attempt for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        match self
            .hasher
            .verify(credentials.password(), &account.password_hash)
        {
            Ok(true) => Ok(account.id),
            Ok(false) => {
                debug!(account_id = %account.id, "login attempt with wrong password");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
            Err(err) => {
                error!(account_id = %account.id, error = %err, "stored password hash unusable");
                Err(Error::internal("password verification failed"))
            }
        }
    }
}

/// Account lookups for authenticated handlers.
#[derive(Clone)]
pub struct AccountQueryService<A> {
    accounts: Arc<A>,
}

impl<A> AccountQueryService<A> {
    /// Create a new query service.
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl<A> AccountQuery for AccountQueryService<A>
where
    A: AccountRepository,
{
    async fn find_account(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        Ok(self.accounts.find_by_id(id).await?)
    }
}
