use std::time::Instant;

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use tracing::{debug, info};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    forecast::{
        entities::NewPrediction,
        ports::{ForecastService, PredictionRepository, PredictionWriter},
        value_objects::{
            BatchRunParams, BatchRunReport, Features, ForecastResult, PredictDemandInput,
            parse_slot,
        },
    },
    health::ports::HealthCheckRepository,
    menu_item::ports::MenuItemRepository,
    training::ports::TrainingDataRepository,
};
use crate::ml::DemandModel;

impl<MI, PR, TD, HC> ForecastService for Service<MI, PR, TD, HC>
where
    MI: MenuItemRepository,
    PR: PredictionRepository,
    TD: TrainingDataRepository,
    HC: HealthCheckRepository,
{
    async fn predict_batch(
        &self,
        model: &DemandModel,
        inputs: Vec<PredictDemandInput>,
    ) -> Result<Vec<ForecastResult>, CoreError> {
        let mut results = Vec::with_capacity(inputs.len());

        for input in inputs {
            let slot = parse_slot(&input.datetime_str)?;
            let features = Features::derive(input.menu_item_id, slot);
            let inference = model.predict(&features);
            let prediction =
                NewPrediction::from_inference(&features, slot, &inference, model.version());

            let predicted_quantity = prediction.predicted_quantity;
            let confidence_score = prediction.confidence_score;
            let prediction_id = self.prediction_repository.upsert(prediction).await?;

            results.push(ForecastResult {
                menu_item_id: input.menu_item_id,
                prediction_id,
                predicted_quantity,
                confidence_score,
            });
        }

        Ok(results)
    }

    async fn run_for_next_hours(
        &self,
        model: &DemandModel,
        params: BatchRunParams,
    ) -> Result<BatchRunReport, CoreError> {
        let menu_item_ids = self.menu_item_repository.list_available_ids().await?;
        let base = truncate_to_hour(Local::now().naive_local());

        info!(
            menu_items = menu_item_ids.len(),
            hours_ahead = params.hours_ahead,
            base = %base,
            model_version = model.version(),
            "starting forecast run"
        );

        let writer = self
            .prediction_repository
            .writer(params.statement_timeout_ms)
            .await?;
        let report = run_forecast_horizon(model, &menu_item_ids, writer, base, &params).await?;

        info!(
            upserts = report.upserts,
            commits = report.commits,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "forecast run complete"
        );

        Ok(report)
    }
}

/// Walk every (hour slot, menu item) pair of the horizon in order, upserting
/// one prediction per pair and committing every `commit_every` upserts. Any
/// failure aborts the run; upserts already committed stay in place.
pub async fn run_forecast_horizon<W: PredictionWriter>(
    model: &DemandModel,
    menu_item_ids: &[i64],
    mut writer: W,
    base: NaiveDateTime,
    params: &BatchRunParams,
) -> Result<BatchRunReport, CoreError> {
    let start = Instant::now();
    let commit_every = params.commit_every.max(1);

    let mut upserts: u64 = 0;
    let mut commits: u64 = 0;
    let mut pending: u32 = 0;

    for offset in 1..=i64::from(params.hours_ahead) {
        let slot = base + Duration::hours(offset);
        for &menu_item_id in menu_item_ids {
            let features = Features::derive(menu_item_id, slot);
            let inference = model.predict(&features);
            let prediction =
                NewPrediction::from_inference(&features, slot, &inference, model.version());

            writer.upsert(prediction).await?;
            upserts += 1;
            pending += 1;

            if pending >= commit_every {
                writer.commit().await?;
                commits += 1;
                pending = 0;
                debug!(upserts, commits, "committed prediction batch");
            }
        }
    }

    if pending > 0 {
        writer.commit().await?;
        commits += 1;
    }

    Ok(BatchRunReport {
        menu_items: menu_item_ids.len(),
        upserts,
        commits,
        elapsed: start.elapsed(),
    })
}

/// Align a wall-clock timestamp to the start of its hour; slot offsets are
/// counted from this base.
pub(crate) fn truncate_to_hour(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_hms_opt(now.hour(), 0, 0).unwrap_or(now)
}
