use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct PredictRequestValidator {
    #[validate(range(min = 1, message = "menu_item_id must be positive"))]
    pub menu_item_id: i64,

    /// ISO-8601 naive timestamp, e.g. `2024-01-15T13:00:00`.
    #[validate(length(min = 1, message = "datetime_str is required"))]
    pub datetime_str: String,
}

/// The request body is a bare JSON array of predict requests.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(transparent)]
pub struct PredictDemandValidator {
    #[validate(nested)]
    pub requests: Vec<PredictRequestValidator>,
}
