use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError, health::ports::HealthCheckRepository,
};

#[derive(Debug, Clone)]
pub struct PostgresHealthRepository {
    pub db: DatabaseConnection,
}

impl PostgresHealthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl HealthCheckRepository for PostgresHealthRepository {
    async fn ping(&self) -> Result<(), CoreError> {
        let stmt = Statement::from_string(sea_orm::DatabaseBackend::Postgres, "SELECT 1");

        self.db.query_one(stmt).await.map_err(|e| {
            error!("Database health check failed: {}", e);
            CoreError::Database
        })?;

        Ok(())
    }
}
