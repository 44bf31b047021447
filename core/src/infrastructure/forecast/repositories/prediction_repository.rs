use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    forecast::{entities::NewPrediction, ports::PredictionRepository},
};
use crate::infrastructure::forecast::repositories::prediction_writer::PostgresPredictionWriter;

#[derive(Debug, Clone)]
pub struct PostgresPredictionRepository {
    pub db: DatabaseConnection,
}

impl PostgresPredictionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Upsert one prediction row on any connection, plain or transactional. The
/// slot key is (menu_item_id, prediction_date, prediction_hour); a conflict
/// overwrites the previous forecast for that slot and returns the same id.
pub(crate) async fn upsert_on<C: ConnectionTrait>(
    conn: &C,
    prediction: &NewPrediction,
) -> Result<i64, CoreError> {
    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Postgres,
        r#"
        INSERT INTO demand_predictions (
            menu_item_id, prediction_date, prediction_hour, day_of_week,
            season, predicted_quantity, confidence_score, model_version
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (menu_item_id, prediction_date, prediction_hour)
        DO UPDATE SET
            day_of_week = EXCLUDED.day_of_week,
            season = EXCLUDED.season,
            predicted_quantity = EXCLUDED.predicted_quantity,
            confidence_score = EXCLUDED.confidence_score,
            model_version = EXCLUDED.model_version
        RETURNING id
        "#,
        [
            prediction.menu_item_id.into(),
            prediction.prediction_date.into(),
            prediction.prediction_hour.into(),
            prediction.day_of_week.into(),
            prediction.season.to_string().into(),
            prediction.predicted_quantity.into(),
            prediction.confidence_score.into(),
            prediction.model_version.clone().into(),
        ],
    );

    let row = conn
        .query_one(stmt)
        .await
        .map_err(|e| {
            error!("Failed to upsert prediction: {}", e);
            CoreError::Database
        })?
        .ok_or_else(|| {
            error!("Prediction upsert returned no row");
            CoreError::Database
        })?;

    row.try_get::<i64>("", "id").map_err(|e| {
        error!("Failed to read upserted prediction id: {}", e);
        CoreError::Database
    })
}

impl PredictionRepository for PostgresPredictionRepository {
    type Writer = PostgresPredictionWriter;

    async fn upsert(&self, prediction: NewPrediction) -> Result<i64, CoreError> {
        upsert_on(&self.db, &prediction).await
    }

    async fn writer(&self, statement_timeout_ms: i64) -> Result<PostgresPredictionWriter, CoreError> {
        Ok(PostgresPredictionWriter::new(
            self.db.clone(),
            statement_timeout_ms,
        ))
    }
}
