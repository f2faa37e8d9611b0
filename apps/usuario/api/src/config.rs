use chrono_tz::Tz;
use core_config::{AppInfo, FromEnv, app_info, env_parse_or, server::ServerConfig};
use database::RetryConfig;
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Zone used to stamp and present timestamps when `APP_TIMEZONE` is unset.
pub const DEFAULT_TIMEZONE: Tz = domain_users::service::DEFAULT_TIMEZONE;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    /// Startup connection backoff (`DB_CONNECT_RETRIES`, `DB_RETRY_DELAY_MS`)
    pub retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// IANA zone name from `APP_TIMEZONE`
    pub timezone: Tz,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - fails without DATABASE_URL
        let retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default

        Ok(Self {
            app: app_info!(),
            database,
            retry,
            server,
            environment,
            timezone: env_parse_or("APP_TIMEZONE", DEFAULT_TIMEZONE)?,
            run_migrations: env_parse_or("RUN_MIGRATIONS", true)?,
        })
    }
}
