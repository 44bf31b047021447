use axum::extract::State;

use tastelogic_core::domain::forecast::ports::ForecastService;
use tastelogic_core::domain::forecast::value_objects::{ForecastResult, PredictDemandInput};

use crate::application::http::forecast::validators::PredictDemandValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[utoipa::path(
    post,
    path = "/predict",
    tag = "forecast",
    summary = "Predict demand",
    description = "Predicts hourly demand for each requested (menu item, timestamp) pair and persists every prediction before responding.",
    responses(
        (status = 200, body = Vec<ForecastResult>)
    ),
    request_body = PredictDemandValidator
)]
pub async fn predict_demand(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<PredictDemandValidator>,
) -> Result<Response<Vec<ForecastResult>>, ApiError> {
    let inputs = payload
        .requests
        .into_iter()
        .map(|req| PredictDemandInput {
            menu_item_id: req.menu_item_id,
            datetime_str: req.datetime_str,
        })
        .collect();

    let results = state
        .service
        .predict_batch(&state.model, inputs)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(results))
}
