use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError, menu_item::ports::MenuItemRepository,
};

#[derive(Debug, Clone)]
pub struct PostgresMenuItemRepository {
    pub db: DatabaseConnection,
}

impl PostgresMenuItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl MenuItemRepository for PostgresMenuItemRepository {
    async fn list_available_ids(&self) -> Result<Vec<i64>, CoreError> {
        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            SELECT id::bigint AS id
            FROM menu_items
            WHERE is_available = true
            ORDER BY id
            "#,
            [],
        );

        let rows = self.db.query_all(stmt).await.map_err(|e| {
            error!("Failed to list available menu items: {}", e);
            CoreError::Database
        })?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.try_get::<i64>("", "id").ok())
            .collect())
    }
}
