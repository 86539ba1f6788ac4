//! Startup task ensuring an administrator account exists.

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;

use coaching_backend::domain::ports::{AccountRepository, PasswordHasher};
use coaching_backend::domain::{EmailAddress, NewAccount, Role};

use super::settings::BootstrapAdmin;

/// Create the administrator unless an account with that email already
/// exists. Returns whether an account was created.
pub async fn ensure_admin<A, H>(accounts: &A, hasher: &H, admin: &BootstrapAdmin) -> Result<bool>
where
    A: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    let email = EmailAddress::new(admin.email.as_str())
        .map_err(|err| eyre!("invalid bootstrap admin email: {err}"))?;
    if accounts
        .find_by_email(&email)
        .await
        .wrap_err("failed to look up bootstrap admin")?
        .is_some()
    {
        return Ok(false);
    }

    let password_hash = hasher
        .hash(&admin.password)
        .wrap_err("failed to hash bootstrap admin password")?;
    let account = accounts
        .create(&NewAccount {
            name: "Administrator".to_owned(),
            email,
            role: Role::Admin,
            password_hash,
            org_level_2: None,
        })
        .await
        .wrap_err("failed to create bootstrap admin")?;
    info!(account_id = %account.id, "bootstrap administrator created");
    Ok(true)
}
