//! HTTP surfaces over [`ProductService`](crate::ProductService).
//!
//! - [`rest`]: resource routes, mounted under `/api/products`
//! - [`legacy`]: verb-style routes kept for existing clients, mounted at the root

pub mod legacy;
pub mod rest;

pub use legacy::{LegacyApiDoc, router as legacy_router};
pub use rest::{ApiDoc, router};
