//! Catalog API - product catalog REST server

use axum::Router;
use axum_helpers::server::{apply_middleware, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::RetryConfig;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Assemble every route: documented API, legacy routes, health and readiness.
fn build_router(state: &AppState) -> Router {
    create_router::<openapi::ApiDoc>(api::routes(state))
        .merge(api::root_routes(state))
        .merge(health_router(state.config.app.clone()))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        max_connections = config.database.max_connections,
        "Connecting to the database"
    );
    let db = database::postgres::connect_from_config_with_retry(
        config.database.clone(),
        RetryConfig::default(),
    )
    .await
    .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name).await?;
    }

    let state = AppState {
        config: config.clone(),
        db,
    };

    let router = apply_middleware(build_router(&state), &config.server)?;

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    let db = state.db.clone();
    create_production_app(router, &config.server, config.shutdown_timeout, async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(()) => info!("Database connections closed"),
            Err(e) => tracing::error!("Failed to close database connections: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
