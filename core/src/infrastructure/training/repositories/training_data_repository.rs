use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    forecast::value_objects::Season,
    training::{ports::TrainingDataRepository, value_objects::TrainingRow},
};

#[derive(Debug, Clone)]
pub struct PostgresTrainingDataRepository {
    pub db: DatabaseConnection,
}

impl PostgresTrainingDataRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TrainingDataRepository for PostgresTrainingDataRepository {
    async fn load_training_rows(&self) -> Result<Vec<TrainingRow>, CoreError> {
        // ISODOW is 1 (Monday) through 7, so ISODOW - 1 matches the Monday = 0
        // numbering the feature derivation uses.
        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            r#"
            SELECT
                oi.menu_item_id::bigint AS menu_item_id,
                EXTRACT(HOUR FROM o.order_time)::smallint AS order_hour,
                (EXTRACT(ISODOW FROM o.order_date) - 1)::smallint AS day_of_week,
                CASE
                    WHEN EXTRACT(MONTH FROM o.order_date) IN (12, 1, 2) THEN 'winter'
                    WHEN EXTRACT(MONTH FROM o.order_date) IN (3, 4, 5) THEN 'spring'
                    WHEN EXTRACT(MONTH FROM o.order_date) IN (6, 7, 8) THEN 'summer'
                    ELSE 'fall'
                END AS season,
                SUM(oi.quantity)::double precision AS total_quantity
            FROM orders o
            JOIN order_items oi ON oi.order_id = o.id
            GROUP BY oi.menu_item_id, o.order_date, order_hour, day_of_week, season
            "#,
            [],
        );

        let rows = self.db.query_all(stmt).await.map_err(|e| {
            error!("Failed to load training rows: {}", e);
            CoreError::Database
        })?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let menu_item_id: i64 = row.try_get("", "menu_item_id").ok()?;
                let order_hour: i16 = row.try_get("", "order_hour").ok()?;
                let day_of_week: i16 = row.try_get("", "day_of_week").ok()?;
                let season: String = row.try_get("", "season").ok()?;
                let total_quantity: f64 = row.try_get("", "total_quantity").ok()?;

                Some(TrainingRow {
                    menu_item_id,
                    order_hour: order_hour as u32,
                    day_of_week: day_of_week as u8,
                    season: season.parse::<Season>().ok()?,
                    total_quantity,
                })
            })
            .collect())
    }
}
