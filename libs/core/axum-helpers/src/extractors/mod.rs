//! Custom extractors for Axum handlers.
//!
//! These reject with [`AppError`](crate::errors::AppError), so every
//! extraction failure renders the standard error body.

pub mod id_path;
pub mod validated_json;
pub mod validated_query;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
