//! Application settings loaded via OrthoConfig.
//!
//! Values come from `COACH_*` environment variables, an optional config file
//! and command-line flags, in increasing order of precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use coaching_backend::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("bootstrap admin requires both email and password")]
    IncompleteBootstrapAdmin,
}

/// Credentials for an administrator ensured at startup.
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

/// Configuration values for the coaching backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COACH")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Initial password for provisioned accounts.
    pub provisioning_default_password: Option<String>,
    /// Email of an administrator account created when missing.
    pub bootstrap_admin_email: Option<String>,
    /// Password for the bootstrap administrator.
    pub bootstrap_admin_password: Option<String>,
}

impl AppSettings {
    /// Return the bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Bootstrap administrator, when both halves are configured.
    pub fn bootstrap_admin(&self) -> Result<Option<BootstrapAdmin>, SettingsError> {
        match (
            &self.bootstrap_admin_email,
            &self.bootstrap_admin_password,
        ) {
            (Some(email), Some(password)) => Ok(Some(BootstrapAdmin {
                email: email.clone(),
                password: password.clone(),
            })),
            (None, None) => Ok(None),
            _ => Err(SettingsError::IncompleteBootstrapAdmin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "COACH_BIND_ADDR",
        "COACH_DATABASE_URL",
        "COACH_DB_MAX_CONNECTIONS",
        "COACH_PROVISIONING_DEFAULT_PASSWORD",
        "COACH_BOOTSTRAP_ADMIN_EMAIL",
        "COACH_BOOTSTRAP_ADMIN_PASSWORD",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("coaching-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.database_url.is_none());
        assert_eq!(settings.db_max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert!(settings.bootstrap_admin().expect("consistent").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("COACH_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "COACH_DATABASE_URL",
                Some("postgres://localhost/coaching".to_owned()),
            ),
            ("COACH_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            (
                "COACH_PROVISIONING_DEFAULT_PASSWORD",
                Some("rotate-me".to_owned()),
            ),
            ("COACH_BOOTSTRAP_ADMIN_EMAIL", Some("root@example.com".to_owned())),
            ("COACH_BOOTSTRAP_ADMIN_PASSWORD", Some("hunter2".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("address").to_string(),
            "127.0.0.1:9000"
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/coaching")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert_eq!(
            settings.provisioning_default_password.as_deref(),
            Some("rotate-me")
        );
        let admin = settings
            .bootstrap_admin()
            .expect("consistent")
            .expect("admin configured");
        assert_eq!(admin.email, "root@example.com");
    }

    #[rstest]
    fn half_configured_bootstrap_admin_is_rejected() {
        let _guard = lock_env(VARS.map(|name| match name {
            "COACH_BOOTSTRAP_ADMIN_EMAIL" => (name, Some("root@example.com".to_owned())),
            _ => (name, None),
        }));

        let settings = load_from_empty_args();

        assert!(matches!(
            settings.bootstrap_admin(),
            Err(SettingsError::IncompleteBootstrapAdmin)
        ));
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env(VARS.map(|name| match name {
            "COACH_BIND_ADDR" => (name, Some("not-an-address".to_owned())),
            _ => (name, None),
        }));

        let settings = load_from_empty_args();

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
