//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Routes mounted at the root: legacy product routes and readiness
pub fn root_routes(state: &AppState) -> Router {
    Router::new()
        .merge(products::legacy_router(state))
        .merge(health::router(state.clone()))
}
