//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use coaching_backend::domain::ports::{AccountRepository, DirectoryRepository};
use coaching_backend::domain::{
    AccountProvisioningService, AccountQueryService, DirectoryAdminService, PasswordLoginService,
    TeamDirectoryService,
};
use coaching_backend::inbound::http::state::{HttpState, HttpStatePorts};
use coaching_backend::outbound::password::Argon2PasswordHasher;
use coaching_backend::outbound::persistence::{DieselAccountRepository, DieselDirectoryRepository};

use super::config::{ServerConfig, Storage};

/// Wire every driving-port service over one directory/account repository
/// pair.
fn build_with<D, A>(
    directory: Arc<D>,
    accounts: Arc<A>,
    initial_password: Option<&str>,
) -> HttpState
where
    D: DirectoryRepository + 'static,
    A: AccountRepository + 'static,
{
    let hasher = Arc::new(Argon2PasswordHasher);
    let provisioning =
        AccountProvisioningService::new(directory.clone(), accounts.clone(), hasher.clone());
    let provisioning = match initial_password {
        Some(password) => provisioning.with_initial_password(password),
        None => provisioning,
    };

    HttpState::new(HttpStatePorts {
        login: Arc::new(PasswordLoginService::new(accounts.clone(), hasher)),
        accounts: Arc::new(AccountQueryService::new(accounts.clone())),
        team: Arc::new(TeamDirectoryService::new(directory.clone())),
        provisioning: Arc::new(provisioning),
        directory_admin: Arc::new(DirectoryAdminService::new(directory, accounts)),
    })
}

/// Build HTTP state for the configured storage backend.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let initial_password = config.initial_password.as_deref();
    match &config.storage {
        Storage::Postgres(pool) => build_with(
            Arc::new(DieselDirectoryRepository::new(pool.clone())),
            Arc::new(DieselAccountRepository::new(pool.clone())),
            initial_password,
        ),
        Storage::Memory(store) => build_with(store.clone(), store.clone(), initial_password),
    }
}
