use std::sync::Arc;

use tastelogic_core::application::TasteLogicService;
use tastelogic_core::ml::DemandModel;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: TasteLogicService,
    pub model: Arc<DemandModel>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: TasteLogicService, model: DemandModel) -> Self {
        Self {
            args,
            service,
            model: Arc::new(model),
        }
    }
}
