use ndarray::Array1;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::info;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    forecast::ports::PredictionRepository,
    health::ports::HealthCheckRepository,
    menu_item::ports::MenuItemRepository,
    training::{
        ports::{TrainingDataRepository, TrainingService},
        value_objects::{TrainParams, TrainReport, TrainingRow},
    },
};
use crate::ml::{
    DemandPipeline, FeatureEncoder, RandomForestRegressor,
    forest::{DEFAULT_N_TREES, DEFAULT_SEED},
    metrics::regression_metrics,
};

/// Fraction of the shuffled rows held out for evaluation.
const TEST_FRACTION: f64 = 0.2;

impl<MI, PR, TD, HC> TrainingService for Service<MI, PR, TD, HC>
where
    MI: MenuItemRepository,
    PR: PredictionRepository,
    TD: TrainingDataRepository,
    HC: HealthCheckRepository,
{
    async fn train_and_save(&self, params: TrainParams) -> Result<TrainReport, CoreError> {
        let rows = self.training_repository.load_training_rows().await?;
        info!(rows = rows.len(), "loaded training rows");

        let (pipeline, report) = fit_demand_model(rows, &params)?;
        pipeline.save(&params.artifact_path)?;

        info!(
            train_rows = report.train_rows,
            test_rows = report.test_rows,
            rmse = report.metrics.rmse,
            r2 = report.metrics.r2,
            artifact = %report.artifact_path.display(),
            model_version = pipeline.version(),
            "training complete"
        );

        Ok(report)
    }
}

/// Fit the encoder and forest on a seeded shuffle-split of the rows and
/// evaluate on the hold-out. Pure so it is testable without a database or
/// filesystem.
pub fn fit_demand_model(
    rows: Vec<TrainingRow>,
    params: &TrainParams,
) -> Result<(DemandPipeline, TrainReport), CoreError> {
    let n = rows.len();
    if n < 2 {
        return Err(CoreError::InsufficientTrainingData);
    }

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    order.shuffle(&mut rng);

    let n_test = ((n as f64 * TEST_FRACTION).round() as usize).clamp(1, n - 1);
    let (test_idx, train_idx) = order.split_at(n_test);

    let train_rows: Vec<TrainingRow> = train_idx.iter().map(|&i| rows[i].clone()).collect();
    let test_rows: Vec<TrainingRow> = test_idx.iter().map(|&i| rows[i].clone()).collect();

    let encoder = FeatureEncoder::fit(&train_rows);
    let x_train = encoder.encode_matrix(&train_rows);
    let y_train = Array1::from_iter(train_rows.iter().map(|r| r.total_quantity));
    let forest =
        RandomForestRegressor::fit(x_train.view(), y_train.view(), DEFAULT_N_TREES, DEFAULT_SEED);

    let x_test = encoder.encode_matrix(&test_rows);
    let predictions: Vec<f64> = (0..test_rows.len())
        .map(|i| forest.predict_mean(x_test.row(i)))
        .collect();
    let actuals: Vec<f64> = test_rows.iter().map(|r| r.total_quantity).collect();
    let metrics = regression_metrics(&predictions, &actuals);

    let pipeline = DemandPipeline::new(encoder, forest, params.model_version.clone());
    let report = TrainReport {
        rows: n,
        train_rows: train_rows.len(),
        test_rows: test_rows.len(),
        metrics,
        artifact_path: params.artifact_path.clone(),
    };

    Ok((pipeline, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::value_objects::Season;

    fn params() -> TrainParams {
        TrainParams {
            artifact_path: "demand_model.bin".into(),
            model_version: "v-test".to_string(),
        }
    }

    fn synthetic_rows(n: usize) -> Vec<TrainingRow> {
        (0..n)
            .map(|i| TrainingRow {
                menu_item_id: (i % 3) as i64 + 1,
                order_hour: (i % 24) as u32,
                day_of_week: (i % 7) as u8,
                season: Season::from_month((i % 12) as u32 + 1),
                total_quantity: ((i % 24) as f64) / 2.0 + 1.0,
            })
            .collect()
    }

    #[test]
    fn split_sizes_follow_the_hold_out_fraction() {
        let (_, report) = fit_demand_model(synthetic_rows(100), &params()).unwrap();

        assert_eq!(report.rows, 100);
        assert_eq!(report.test_rows, 20);
        assert_eq!(report.train_rows, 80);
        assert_eq!(report.metrics.n_samples, 20);
    }

    #[test]
    fn tiny_datasets_still_keep_one_row_on_each_side() {
        let (_, report) = fit_demand_model(synthetic_rows(2), &params()).unwrap();

        assert_eq!(report.test_rows, 1);
        assert_eq!(report.train_rows, 1);
    }

    #[test]
    fn fitting_is_deterministic() {
        let (a, _) = fit_demand_model(synthetic_rows(40), &params()).unwrap();
        let (b, _) = fit_demand_model(synthetic_rows(40), &params()).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn the_pipeline_carries_the_requested_version() {
        let (pipeline, report) = fit_demand_model(synthetic_rows(20), &params()).unwrap();

        assert_eq!(pipeline.version(), "v-test");
        assert_eq!(report.artifact_path, params().artifact_path);
    }

    #[test]
    fn fewer_than_two_rows_is_an_error() {
        for n in [0, 1] {
            assert!(matches!(
                fit_demand_model(synthetic_rows(n), &params()),
                Err(CoreError::InsufficientTrainingData)
            ));
        }
    }

    #[test]
    fn hold_out_metrics_are_finite() {
        let (_, report) = fit_demand_model(synthetic_rows(60), &params()).unwrap();

        assert!(report.metrics.mse.is_finite());
        assert!(report.metrics.rmse.is_finite());
        assert!(report.metrics.mae.is_finite());
        assert!(report.metrics.r2.is_finite());
    }
}
