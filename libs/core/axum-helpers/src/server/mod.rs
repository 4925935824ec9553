//! Server infrastructure module.
//!
//! - Router assembly with OpenAPI documentation
//! - Cross-cutting middleware (tracing, security headers, CORS, compression)
//! - Health and readiness endpoints
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{apply_middleware, create_app, create_router, health_router};
//! use core_config::{server::ServerConfig, app_info};
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(api_routes).merge(health_router(app_info!()));
//! let app = apply_middleware(router, &config)?;
//!
//! create_app(app, &config).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{apply_middleware, create_app, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
