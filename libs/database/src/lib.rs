//! Database library providing the SQL connector and shared utilities.
//!
//! # Features
//!
//! - `postgres` (default) - SeaORM connector, migrations runner, health check
//! - `config` - `PostgresConfig` loading through `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::common::RetryConfig;
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_from_config_with_retry(config, RetryConfig::default()).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "catalog_api").await?;
//! postgres::check_health(&db).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
