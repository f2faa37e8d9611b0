//! Shared state handed to the routers at startup.

/// Cloned into each router; the connection pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}
