use crate::domain::{
    forecast::ports::PredictionRepository, health::ports::HealthCheckRepository,
    menu_item::ports::MenuItemRepository, training::ports::TrainingDataRepository,
};

/// Aggregate of the repositories behind every domain service.
///
/// Built once at startup by [`crate::application::create_service`]; the model
/// artifact is loaded separately and passed in explicitly where needed.
#[derive(Debug, Clone)]
pub struct Service<MI, PR, TD, HC>
where
    MI: MenuItemRepository,
    PR: PredictionRepository,
    TD: TrainingDataRepository,
    HC: HealthCheckRepository,
{
    pub(crate) menu_item_repository: MI,
    pub(crate) prediction_repository: PR,
    pub(crate) training_repository: TD,
    pub(crate) health_repository: HC,
}

impl<MI, PR, TD, HC> Service<MI, PR, TD, HC>
where
    MI: MenuItemRepository,
    PR: PredictionRepository,
    TD: TrainingDataRepository,
    HC: HealthCheckRepository,
{
    pub fn new(
        menu_item_repository: MI,
        prediction_repository: PR,
        training_repository: TD,
        health_repository: HC,
    ) -> Self {
        Self {
            menu_item_repository,
            prediction_repository,
            training_repository,
            health_repository,
        }
    }
}
