use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    forecast::ports::PredictionRepository,
    health::ports::{HealthCheckRepository, HealthService},
    menu_item::ports::MenuItemRepository,
    training::ports::TrainingDataRepository,
};

impl<MI, PR, TD, HC> HealthService for Service<MI, PR, TD, HC>
where
    MI: MenuItemRepository,
    PR: PredictionRepository,
    TD: TrainingDataRepository,
    HC: HealthCheckRepository,
{
    async fn readiness(&self) -> Result<(), CoreError> {
        self.health_repository.ping().await
    }
}
