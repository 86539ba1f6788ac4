//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use coaching_backend::outbound::memory::InMemoryStore;
use coaching_backend::outbound::persistence::DbPool;

/// Backing store for the repositories.
#[derive(Clone)]
pub enum Storage {
    Postgres(DbPool),
    Memory(Arc<InMemoryStore>),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
    pub(crate) initial_password: Option<String>,
}

impl ServerConfig {
    /// Construct a configuration backed by an empty in-memory store.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            storage: Storage::Memory(Arc::new(InMemoryStore::default())),
            initial_password: None,
        }
    }

    /// Use the given storage backend.
    #[must_use]
    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    /// Override the initial password assigned to provisioned accounts.
    #[must_use]
    pub fn with_initial_password(mut self, password: Option<String>) -> Self {
        self.initial_password = password;
        self
    }
}
