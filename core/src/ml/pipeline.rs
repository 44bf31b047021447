use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::forecast::value_objects::Features;
use crate::ml::{
    MlError,
    artifact,
    encoder::FeatureEncoder,
    forest::{RandomForestRegressor, quantile},
};

/// How a prediction's confidence score is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfidenceStrategy {
    /// Credible interval over the ensemble's per-tree predictions; narrow
    /// intervals score close to 100, wide ones approach 0.
    Interval { q_low: f64, q_high: f64 },
    /// Constant placeholder score, clamped to [0, 100].
    Fixed { score: f64 },
}

impl Default for ConfidenceStrategy {
    fn default() -> Self {
        ConfidenceStrategy::Interval {
            q_low: 0.05,
            q_high: 0.95,
        }
    }
}

impl FromStr for ConfidenceStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interval" => Ok(ConfidenceStrategy::default()),
            "fixed" => Ok(ConfidenceStrategy::Fixed { score: 80.0 }),
            other => Err(format!(
                "unknown confidence strategy `{other}` (expected `interval` or `fixed`)"
            )),
        }
    }
}

/// The serialized training product: fitted encoder, fitted forest, and the
/// version tag stamped on every prediction made with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPipeline {
    pub(crate) encoder: FeatureEncoder,
    pub(crate) forest: RandomForestRegressor,
    pub(crate) version: String,
}

impl DemandPipeline {
    pub fn new(encoder: FeatureEncoder, forest: RandomForestRegressor, version: String) -> Self {
        Self {
            encoder,
            forest,
            version,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn save(&self, path: &Path) -> Result<(), MlError> {
        artifact::save(self, path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub quantity: f64,
    pub confidence: f64,
}

/// A loaded pipeline paired with the confidence strategy chosen at startup.
///
/// Constructed once per process and passed explicitly to the services that
/// need it; immutable for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct DemandModel {
    pipeline: DemandPipeline,
    strategy: ConfidenceStrategy,
}

impl DemandModel {
    pub fn new(pipeline: DemandPipeline, strategy: ConfidenceStrategy) -> Result<Self, MlError> {
        if pipeline.forest.is_empty() {
            return Err(MlError::EmptyModel);
        }
        Ok(Self { pipeline, strategy })
    }

    pub fn load(path: &Path, strategy: ConfidenceStrategy) -> Result<Self, MlError> {
        Self::new(artifact::load(path)?, strategy)
    }

    pub fn version(&self) -> &str {
        self.pipeline.version()
    }

    pub fn predict(&self, features: &Features) -> Inference {
        let encoded = self.pipeline.encoder.encode(features);

        match &self.strategy {
            ConfidenceStrategy::Interval { q_low, q_high } => {
                let members = self.pipeline.forest.predict_members(encoded.view());
                let quantity = members.iter().sum::<f64>() / members.len() as f64;
                let low = quantile(&members, *q_low);
                let high = quantile(&members, *q_high);
                Inference {
                    quantity,
                    confidence: interval_confidence(quantity, low, high),
                }
            }
            ConfidenceStrategy::Fixed { score } => Inference {
                quantity: self.pipeline.forest.predict_mean(encoded.view()),
                confidence: score.clamp(0.0, 100.0),
            },
        }
    }
}

/// Map interval width relative to the point estimate into a [0, 100] score.
/// Zero width scores exactly 100; wider intervals score strictly lower. The
/// scale floor of 1.0 keeps near-zero predictions from inflating the relative
/// width.
pub fn interval_confidence(point: f64, low: f64, high: f64) -> f64 {
    let width = (high - low).max(0.0);
    let scale = point.abs().max(1.0);
    (100.0 / (1.0 + width / scale)).clamp(0.0, 100.0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::forecast::value_objects::Season;
    use crate::domain::training::value_objects::TrainingRow;
    use ndarray::array;

    pub(crate) fn fitted_pipeline() -> DemandPipeline {
        let rows = vec![
            TrainingRow {
                menu_item_id: 7,
                order_hour: 13,
                day_of_week: 0,
                season: Season::Winter,
                total_quantity: 4.0,
            },
            TrainingRow {
                menu_item_id: 7,
                order_hour: 19,
                day_of_week: 4,
                season: Season::Winter,
                total_quantity: 12.0,
            },
            TrainingRow {
                menu_item_id: 9,
                order_hour: 13,
                day_of_week: 0,
                season: Season::Summer,
                total_quantity: 6.0,
            },
            TrainingRow {
                menu_item_id: 9,
                order_hour: 19,
                day_of_week: 4,
                season: Season::Summer,
                total_quantity: 10.0,
            },
        ];
        let encoder = FeatureEncoder::fit(&rows);
        let x = encoder.encode_matrix(&rows);
        let y = array![4.0, 12.0, 6.0, 10.0];
        let forest = RandomForestRegressor::fit(x.view(), y.view(), 20, 42);
        DemandPipeline::new(encoder, forest, "v1-test".to_string())
    }

    #[test]
    fn interval_confidence_stays_within_bounds() {
        for (point, low, high) in [
            (0.0, 0.0, 0.0),
            (5.0, 1.0, 9.0),
            (0.1, 0.0, 1000.0),
            (100.0, 100.0, 100.0),
        ] {
            let confidence = interval_confidence(point, low, high);
            assert!((0.0..=100.0).contains(&confidence));
        }
    }

    #[test]
    fn zero_width_interval_means_full_confidence() {
        assert_eq!(interval_confidence(7.0, 7.0, 7.0), 100.0);
        assert_eq!(interval_confidence(0.0, 0.0, 0.0), 100.0);
    }

    #[test]
    fn wider_intervals_strictly_lower_confidence() {
        let narrow = interval_confidence(10.0, 9.0, 11.0);
        let medium = interval_confidence(10.0, 7.0, 13.0);
        let wide = interval_confidence(10.0, 0.0, 20.0);

        assert!(narrow > medium);
        assert!(medium > wide);
    }

    #[test]
    fn inverted_interval_is_treated_as_zero_width() {
        assert_eq!(interval_confidence(5.0, 9.0, 1.0), 100.0);
    }

    #[test]
    fn fixed_strategy_reports_the_configured_score() {
        let model =
            DemandModel::new(fitted_pipeline(), ConfidenceStrategy::Fixed { score: 80.0 }).unwrap();
        let features = Features {
            menu_item_id: 7,
            order_hour: 13,
            day_of_week: 0,
            season: Season::Winter,
        };

        let inference = model.predict(&features);
        assert_eq!(inference.confidence, 80.0);
        assert!(inference.quantity >= 0.0);
    }

    #[test]
    fn interval_strategy_stays_within_confidence_bounds() {
        let model =
            DemandModel::new(fitted_pipeline(), ConfidenceStrategy::default()).unwrap();
        let features = Features {
            menu_item_id: 9,
            order_hour: 19,
            day_of_week: 4,
            season: Season::Summer,
        };

        let inference = model.predict(&features);
        assert!((0.0..=100.0).contains(&inference.confidence));
        assert!(inference.quantity > 0.0);
    }

    #[test]
    fn an_empty_ensemble_is_rejected() {
        let rows: Vec<TrainingRow> = Vec::new();
        let encoder = FeatureEncoder::fit(&rows);
        let forest = RandomForestRegressor::fit(
            ndarray::Array2::zeros((0, encoder.width())).view(),
            ndarray::Array1::zeros(0).view(),
            10,
            42,
        );
        let pipeline = DemandPipeline::new(encoder, forest, "v0".to_string());

        assert!(matches!(
            DemandModel::new(pipeline, ConfidenceStrategy::default()),
            Err(MlError::EmptyModel)
        ));
    }

    #[test]
    fn strategy_parsing_accepts_the_two_variants() {
        assert_eq!(
            "interval".parse::<ConfidenceStrategy>().unwrap(),
            ConfidenceStrategy::default()
        );
        assert_eq!(
            "fixed".parse::<ConfidenceStrategy>().unwrap(),
            ConfidenceStrategy::Fixed { score: 80.0 }
        );
        assert!("bogus".parse::<ConfidenceStrategy>().is_err());
    }
}
