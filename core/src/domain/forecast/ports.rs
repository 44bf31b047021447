use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::forecast::entities::NewPrediction;
use crate::domain::forecast::value_objects::{
    BatchRunParams, BatchRunReport, ForecastResult, PredictDemandInput,
};
use crate::ml::DemandModel;

pub trait PredictionRepository: Send + Sync {
    type Writer: PredictionWriter;

    /// Upsert one prediction on the repository's own connection, committed
    /// immediately. Re-upserting the same slot overwrites the row and returns
    /// the same id.
    fn upsert(
        &self,
        prediction: NewPrediction,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;

    /// Open a transactional writer that batches many upserts between commits.
    fn writer(
        &self,
        statement_timeout_ms: i64,
    ) -> impl Future<Output = Result<Self::Writer, CoreError>> + Send;
}

/// A sink for batched prediction upserts sharing one transaction.
///
/// `commit` ends the current transaction; the next `upsert` starts a fresh
/// one. Dropping the writer without a commit rolls back whatever is pending.
pub trait PredictionWriter: Send {
    fn upsert(
        &mut self,
        prediction: NewPrediction,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;

    fn commit(&mut self) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait ForecastService: Send + Sync {
    fn predict_batch(
        &self,
        model: &DemandModel,
        inputs: Vec<PredictDemandInput>,
    ) -> impl Future<Output = Result<Vec<ForecastResult>, CoreError>> + Send;

    fn run_for_next_hours(
        &self,
        model: &DemandModel,
        params: BatchRunParams,
    ) -> impl Future<Output = Result<BatchRunReport, CoreError>> + Send;
}
