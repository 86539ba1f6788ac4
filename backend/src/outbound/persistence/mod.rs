//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the directory and account repository ports
//! backed by PostgreSQL through `diesel-async` and `bb8` pooling.
//!
//! Row structs (`models.rs`) and the table definitions (`schema.rs`) stay
//! private to this module. Every driver failure is mapped to the owning
//! port's error type before it leaves an adapter.
//!
//! # Example
//!
//! ```ignore
//! use coaching_backend::outbound::persistence::{
//!     DbPool, DieselDirectoryRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/coaching")).await?;
//! let directory = DieselDirectoryRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_directory_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_directory_repository::DieselDirectoryRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
