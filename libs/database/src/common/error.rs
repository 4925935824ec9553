/// Error type for connection management, migrations and health checks.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Orm(#[from] sea_orm::DbErr),

    /// Every connection attempt failed
    #[error("Connection failed after {attempts} attempts: {message}")]
    ConnectionFailed { attempts: u32, message: String },

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
