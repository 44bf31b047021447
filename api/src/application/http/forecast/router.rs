use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::predict_demand::{__path_predict_demand, predict_demand};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(predict_demand))]
pub struct ForecastApiDoc;

pub fn forecast_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/predict", state.args.server.root_path),
        post(predict_demand),
    )
}
