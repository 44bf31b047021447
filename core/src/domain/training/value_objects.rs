use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::forecast::value_objects::Season;
use crate::ml::RegressionMetrics;

/// One aggregated historical observation: total quantity ordered for a menu
/// item during one hour slot of one day. `day_of_week` is Monday = 0, the
/// same convention the inference features use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub menu_item_id: i64,
    pub order_hour: u32,
    pub day_of_week: u8,
    pub season: Season,
    pub total_quantity: f64,
}

#[derive(Debug, Clone)]
pub struct TrainParams {
    pub artifact_path: PathBuf,
    pub model_version: String,
}

#[derive(Debug, Clone)]
pub struct TrainReport {
    pub rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub metrics: RegressionMetrics,
    pub artifact_path: PathBuf,
}
