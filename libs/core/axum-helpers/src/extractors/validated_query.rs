//! Query string extractor with validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Like [`ValidatedJson`](super::ValidatedJson) but for query parameters.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state).await?;
        data.validate()?;
        Ok(ValidatedQuery(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Paging {
        #[validate(range(min = 1, max = 100))]
        size: u64,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            get(|ValidatedQuery(p): ValidatedQuery<Paging>| async move { p.size.to_string() }),
        )
    }

    async fn status_for(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_query_validation() {
        assert_eq!(status_for("/?size=10").await, StatusCode::OK);
        assert_eq!(status_for("/?size=0").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/?size=abc").await, StatusCode::BAD_REQUEST);
    }
}
