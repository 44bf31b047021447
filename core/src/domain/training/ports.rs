use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::training::value_objects::{TrainParams, TrainReport, TrainingRow};

#[cfg_attr(test, mockall::automock)]
pub trait TrainingDataRepository: Send + Sync {
    /// Aggregated historical order line items, one row per
    /// (menu_item_id, order_date, order_hour).
    fn load_training_rows(&self) -> impl Future<Output = Result<Vec<TrainingRow>, CoreError>> + Send;
}

pub trait TrainingService: Send + Sync {
    /// Fit the demand pipeline on historical orders and overwrite the
    /// artifact file.
    fn train_and_save(
        &self,
        params: TrainParams,
    ) -> impl Future<Output = Result<TrainReport, CoreError>> + Send;
}
