use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::{DatabaseError, DatabaseResult};

/// Run `SELECT 1` against the pool. Used by the readiness probe.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    debug!("Running database health check");

    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1");
    db.query_one(stmt)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    debug!("Database health check passed");
    Ok(())
}
