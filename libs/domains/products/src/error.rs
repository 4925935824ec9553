use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with id {0} not found")]
    NotFound(i64),

    /// The request decoded but breaks the input rules
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationErrors),

    /// The request payload or path could not be decoded
    #[error("Malformed request: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Stable tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProductError::NotFound(_) => "NotFound",
            ProductError::InvalidArgument(_) => "InvalidArgument",
            ProductError::Decode(_) => "DecodeError",
            ProductError::Database(_) | ProductError::Internal(_) => "Internal",
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => {
                AppError::NotFound(format!("Product with id {} not found", id))
            }
            ProductError::InvalidArgument(errors) => AppError::ValidationError(errors),
            ProductError::Decode(msg) => AppError::InvalidJson(msg),
            ProductError::Database(e) => AppError::Database(e),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
