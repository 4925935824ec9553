//! Configuration for Catalog API

use core_config::{AppInfo, FromEnv, app_info, env_parse_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
    /// Upper bound for connection cleanup after a shutdown signal
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required: DATABASE_URL
        let server = ServerConfig::from_env()?;
        let run_migrations = env_parse_or_default("RUN_MIGRATIONS", "true")?;
        let shutdown_timeout_secs: u64 = env_parse_or_default("SHUTDOWN_TIMEOUT_SECS", "30")?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations,
            shutdown_timeout: Duration::from_secs(shutdown_timeout_secs),
        })
    }
}
