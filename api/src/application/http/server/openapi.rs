use utoipa::OpenApi;

use crate::application::http::forecast::router::ForecastApiDoc;

// An empty string literal is rejected by the derive macro, but an expression
// evaluating to "" is accepted and nests at the root.
const ROOT: &str = "";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TasteLogic Demand API"
    ),
    nest(
        (path = ROOT, api = ForecastApiDoc),
    )
)]
pub struct ApiDoc;
