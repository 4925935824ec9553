use super::shutdown::{ShutdownCoordinator, coordinated_shutdown, shutdown_signal};
use crate::errors::handlers::not_found;
use crate::http::{cors::create_cors_layer, security::security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if the TCP listener fails to bind to the configured
/// address or the server fails while running.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Creates the documented API router.
///
/// Sets up:
/// - OpenAPI document at `/api-docs/openapi.json`
/// - Documentation UIs at `/scalar`, `/redoc` and `/rapidoc`
/// - API routes nested under `/api`
/// - JSON 404 fallback
///
/// No middleware is applied here so the caller can merge more routes
/// (health, compatibility endpoints) before calling [`apply_middleware`].
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Example
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new()
///     .route("/products", get(handler))
///     .with_state(state);
///
/// let router = create_router::<ApiDoc>(api_routes);
/// ```
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    let openapi = T::openapi();

    Router::new()
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", openapi.clone()).path("/rapidoc"))
        .merge(Redoc::with_url("/redoc", openapi.clone()))
        .merge(Scalar::with_url("/scalar", openapi))
        .nest("/api", apis)
        .fallback(not_found)
}

/// Wraps a router with the cross-cutting HTTP layers.
///
/// Layers, outermost last:
/// - request/response tracing spans
/// - security headers
/// - CORS restricted to `server_config.cors_allowed_origins`
/// - response compression (gzip, br, deflate, zstd)
///
/// # Errors
/// Returns `InvalidInput` when the configured CORS origins are unusable.
pub fn apply_middleware(router: Router, server_config: &ServerConfig) -> io::Result<Router> {
    let cors_layer = create_cors_layer(&server_config.cors_allowed_origins)?;
    info!(
        origins = ?server_config.cors_allowed_origins,
        "CORS configured with allowed origins"
    );

    Ok(router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new()))
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// On SIGINT/SIGTERM the server stops accepting connections, drains
/// in-flight requests and runs `cleanup` bounded by `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_shutdown().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator.clone()))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // A serve error skips the signal path; release the cleanup task anyway.
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct TestDoc;

    fn router() -> Router {
        create_router::<TestDoc>(Router::new().route("/ping", get(|| async { "pong" })))
    }

    async fn get_status(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_api_routes_are_nested() {
        assert_eq!(get_status(router(), "/api/ping").await, StatusCode::OK);
        assert_eq!(get_status(router(), "/ping").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        assert_eq!(
            get_status(router(), "/api-docs/openapi.json").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_apply_middleware_adds_headers() {
        let app = apply_middleware(router(), &ServerConfig::default()).unwrap();
        let response = app
            .oneshot(Request::get("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[test]
    fn test_apply_middleware_rejects_empty_origins() {
        let mut config = ServerConfig::default();
        config.cors_allowed_origins.clear();
        assert!(apply_middleware(router(), &config).is_err());
    }
}
