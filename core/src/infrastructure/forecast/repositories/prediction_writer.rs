use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    forecast::{entities::NewPrediction, ports::PredictionWriter},
};
use crate::infrastructure::forecast::repositories::prediction_repository::upsert_on;

/// Transactional writer for the batch runner. Each transaction is opened
/// lazily on the first upsert after a commit and carries a local
/// statement_timeout so one stuck statement cannot hang the whole run.
#[derive(Debug)]
pub struct PostgresPredictionWriter {
    db: DatabaseConnection,
    statement_timeout_ms: i64,
    txn: Option<DatabaseTransaction>,
}

impl PostgresPredictionWriter {
    pub fn new(db: DatabaseConnection, statement_timeout_ms: i64) -> Self {
        Self {
            db,
            statement_timeout_ms,
            txn: None,
        }
    }

    async fn open(&mut self) -> Result<&DatabaseTransaction, CoreError> {
        if self.txn.is_none() {
            let txn = self.db.begin().await.map_err(|e| {
                error!("Failed to begin prediction transaction: {}", e);
                CoreError::Database
            })?;

            // SET LOCAL scopes the timeout to this transaction only.
            txn.execute_unprepared(&format!(
                "SET LOCAL statement_timeout = {}",
                self.statement_timeout_ms
            ))
            .await
            .map_err(|e| {
                error!("Failed to set statement timeout: {}", e);
                CoreError::Database
            })?;

            self.txn = Some(txn);
        }

        self.txn.as_ref().ok_or(CoreError::Database)
    }
}

impl PredictionWriter for PostgresPredictionWriter {
    async fn upsert(&mut self, prediction: NewPrediction) -> Result<i64, CoreError> {
        let txn = self.open().await?;
        upsert_on(txn, &prediction).await
    }

    async fn commit(&mut self) -> Result<(), CoreError> {
        if let Some(txn) = self.txn.take() {
            txn.commit().await.map_err(|e| {
                error!("Failed to commit prediction batch: {}", e);
                CoreError::Database
            })?;
        }
        Ok(())
    }
}
