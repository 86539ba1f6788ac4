//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountProvisioning, AccountQuery, DirectoryAdminQuery, LoginService, TeamDirectoryQuery,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountQuery>,
    pub team: Arc<dyn TeamDirectoryQuery>,
    pub provisioning: Arc<dyn AccountProvisioning>,
    pub directory_admin: Arc<dyn DirectoryAdminQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountQuery>,
    pub team: Arc<dyn TeamDirectoryQuery>,
    pub provisioning: Arc<dyn AccountProvisioning>,
    pub directory_admin: Arc<dyn DirectoryAdminQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use coaching_backend::domain::{
    ///     AccountProvisioningService, AccountQueryService, DirectoryAdminService,
    ///     PasswordLoginService, TeamDirectoryService,
    /// };
    /// use coaching_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use coaching_backend::outbound::memory::InMemoryStore;
    /// use coaching_backend::outbound::password::Argon2PasswordHasher;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let hasher = Arc::new(Argon2PasswordHasher);
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(PasswordLoginService::new(store.clone(), hasher.clone())),
    ///     accounts: Arc::new(AccountQueryService::new(store.clone())),
    ///     team: Arc::new(TeamDirectoryService::new(store.clone())),
    ///     provisioning: Arc::new(AccountProvisioningService::new(
    ///         store.clone(),
    ///         store.clone(),
    ///         hasher,
    ///     )),
    ///     directory_admin: Arc::new(DirectoryAdminService::new(store.clone(), store)),
    /// });
    /// let _team = state.team.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            accounts,
            team,
            provisioning,
            directory_admin,
        } = ports;
        Self {
            login,
            accounts,
            team,
            provisioning,
            directory_admin,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
