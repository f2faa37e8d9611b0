//! PostgreSQL connectivity for the service binaries.
//!
//! - [`postgres`]: pool configuration, connect-with-retry, migrations, health check
//! - [`common`]: [`DatabaseError`](common::DatabaseError) and the backoff helper
//!
//! Feature `config` adds `core_config::FromEnv` impls for
//! [`PostgresConfig`](postgres::PostgresConfig) and
//! [`RetryConfig`](common::RetryConfig).
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "usuario_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
