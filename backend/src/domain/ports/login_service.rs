//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! importing the account store or the password hasher.

use async_trait::async_trait;

use crate::domain::{AccountId, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account id.
    ///
    /// Unknown emails and wrong passwords produce the same
    /// [`crate::domain::ErrorCode::Unauthorized`] error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccountId, Error>;
}
