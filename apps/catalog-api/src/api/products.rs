//! Products API routes

use axum::Router;
use domain_products::{PgProductRepository, ProductService, handlers};

use crate::state::AppState;

fn service(state: &AppState) -> ProductService<PgProductRepository> {
    ProductService::new(PgProductRepository::new(state.db.clone()))
}

/// Resource routes, nested at `/api/products`
pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}

/// Legacy verb-style routes, merged at the root
pub fn legacy_router(state: &AppState) -> Router {
    handlers::legacy_router(service(state))
}
