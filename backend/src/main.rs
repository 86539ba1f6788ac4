//! Backend entry-point: loads settings, prepares storage and runs the HTTP
//! server.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use coaching_backend::domain::ports::AccountRepository;
use coaching_backend::inbound::http::health::HealthState;
use coaching_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use coaching_backend::outbound::memory::InMemoryStore;
use coaching_backend::outbound::password::Argon2PasswordHasher;
use coaching_backend::outbound::persistence::{
    DbPool, DieselAccountRepository, PoolConfig, run_pending_migrations,
};

use server::bootstrap::ensure_admin;
use server::settings::AppSettings;
use server::{ServerConfig, Storage, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        key_fingerprint = %session.key_fingerprint(),
        cookie_secure = session.cookie_secure,
        "session settings loaded"
    );

    let storage = connect_storage(&settings).await?;
    if let Some(admin) = settings.bootstrap_admin()? {
        let accounts: Arc<dyn AccountRepository> = match &storage {
            Storage::Postgres(pool) => Arc::new(DieselAccountRepository::new(pool.clone())),
            Storage::Memory(store) => store.clone(),
        };
        ensure_admin(accounts.as_ref(), &Argon2PasswordHasher, &admin).await?;
    }

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr()?,
    )
    .with_storage(storage)
    .with_initial_password(settings.provisioning_default_password.clone());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server terminated abnormally")
}

async fn connect_storage(settings: &AppSettings) -> Result<Storage> {
    let Some(database_url) = settings.database_url.as_deref() else {
        warn!("no database configured; using in-memory storage");
        return Ok(Storage::Memory(Arc::new(InMemoryStore::default())));
    };

    run_pending_migrations(database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.db_max_connections()))
        .await
        .wrap_err("failed to build database pool")?;
    Ok(Storage::Postgres(pool))
}
