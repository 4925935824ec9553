//! Verb-style routes kept for existing clients.
//!
//! Every failure, whatever its kind, answers `500` with an empty body and
//! is logged with its kind and message.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductError;
use crate::models::{CreateProduct, LegacyUpdateProduct, Product, ProductListRequest, ProductPage};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "products-legacy";

/// OpenAPI documentation for the legacy product routes
#[derive(OpenApi)]
#[openapi(
    paths(
        get_product,
        create_product,
        delete_product,
        update_product,
        list_products,
        list_categories,
    ),
    components(schemas(Product, CreateProduct, LegacyUpdateProduct, ProductListRequest, ProductPage)),
    tags(
        (name = TAG, description = "Legacy product routes, every failure is an empty 500")
    )
)]
pub struct LegacyApiDoc;

/// Error wrapper that collapses every [`ProductError`] into an empty 500.
#[derive(Debug)]
pub struct LegacyError(pub ProductError);

impl From<ProductError> for LegacyError {
    fn from(err: ProductError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for LegacyError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ProductError::Decode(rejection.body_text()))
    }
}

impl From<PathRejection> for LegacyError {
    fn from(rejection: PathRejection) -> Self {
        Self(ProductError::Decode(rejection.body_text()))
    }
}

impl IntoResponse for LegacyError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        tracing::error!(
            status = status.as_u16(),
            error_type = self.0.kind(),
            message = %self.0,
            "Request failed"
        );
        status.into_response()
    }
}

type LegacyResult<T> = Result<T, LegacyError>;

/// Create the legacy router, meant to be merged at the root
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/get/product/by/{productId}", get(get_product))
        .route("/create/product", post(create_product))
        .route("/delete/product/{productId}", post(delete_product))
        .route("/update/product", post(update_product))
        .route("/product/list", post(list_products))
        .route("/product/category/list", get(list_categories))
        .with_state(shared_service)
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/get/product/by/{productId}",
    tag = TAG,
    params(
        ("productId" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 500, description = "Any failure, empty body")
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    id: Result<Path<i64>, PathRejection>,
) -> LegacyResult<Json<Product>> {
    let Path(id) = id?;
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/create/product",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 500, description = "Any failure, empty body")
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    input: Result<Json<CreateProduct>, JsonRejection>,
) -> LegacyResult<Json<Product>> {
    let Json(input) = input?;
    let product = service.create_product(input).await?;
    Ok(Json(product))
}

/// Delete a product, answers `true`
#[utoipa::path(
    post,
    path = "/delete/product/{productId}",
    tag = TAG,
    params(
        ("productId" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = bool),
        (status = 500, description = "Any failure, empty body")
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    id: Result<Path<i64>, PathRejection>,
) -> LegacyResult<Json<bool>> {
    let Path(id) = id?;
    service.delete_product(id).await?;
    Ok(Json(true))
}

/// Update a product, the id travels in the body
#[utoipa::path(
    post,
    path = "/update/product",
    tag = TAG,
    request_body = LegacyUpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 500, description = "Any failure, empty body")
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    input: Result<Json<LegacyUpdateProduct>, JsonRejection>,
) -> LegacyResult<Json<Product>> {
    let Json(input) = input?;
    let (id, update) = input.into_parts();
    let product = service.update_product(id, update).await?;
    Ok(Json(product))
}

/// One page of products in a category
#[utoipa::path(
    post,
    path = "/product/list",
    tag = TAG,
    request_body = ProductListRequest,
    responses(
        (status = 200, description = "Page of products", body = ProductPage),
        (status = 500, description = "Any failure, empty body")
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    request: Result<Json<ProductListRequest>, JsonRejection>,
) -> LegacyResult<Json<ProductPage>> {
    let Json(request) = request?;
    let page = service.list_by_category(request).await?;
    Ok(Json(page))
}

/// Distinct categories
#[utoipa::path(
    get,
    path = "/product/category/list",
    tag = TAG,
    responses(
        (status = 200, description = "Distinct categories", body = Vec<String>),
        (status = 500, description = "Any failure, empty body")
    )
)]
async fn list_categories<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> LegacyResult<Json<Vec<String>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}
