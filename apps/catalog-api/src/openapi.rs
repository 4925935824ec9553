//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// OpenAPI documentation for the resource routes under `/api/products`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog: resource routes under /api/products plus the legacy verb-style routes",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    )
)]
struct ResourceDoc;

/// Combined documentation. The legacy routes live at the root, so they are
/// merged rather than nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ResourceDoc::openapi();
        doc.merge(domain_products::LegacyApiDoc::openapi());
        doc
    }
}
