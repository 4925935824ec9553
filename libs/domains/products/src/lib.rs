//! Products Domain
//!
//! Product catalog: create, read, update and delete products, page through
//! a category and list the distinct categories.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← REST routes (/api/products) and legacy routes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, "must exist" checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and SeaORM implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, request DTOs, page
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//!
//! let rest = handlers::router(service.clone());
//! let legacy = handlers::legacy_router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{
    CreateProduct, LegacyUpdateProduct, PageRequest, Product, ProductListRequest, ProductPage,
    UpdateProduct,
};
pub use handlers::{ApiDoc, LegacyApiDoc};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
