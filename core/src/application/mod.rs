use std::time::Duration;

use crate::domain::common::{TasteLogicConfig, services::Service};
use crate::infrastructure::{
    PostgresHealthRepository, PostgresMenuItemRepository, PostgresPredictionRepository,
    PostgresTrainingDataRepository,
    db::postgres::{Postgres, PostgresConfig, database_url},
};

pub type TasteLogicService = Service<
    PostgresMenuItemRepository,
    PostgresPredictionRepository,
    PostgresTrainingDataRepository,
    PostgresHealthRepository,
>;

/// Connect to the database, apply pending migrations and wire every
/// repository behind one service value.
pub async fn create_service(config: TasteLogicConfig) -> Result<TasteLogicService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: database_url(&config.database),
        connect_timeout: Duration::from_secs(config.database.connect_timeout),
    })
    .await?;
    postgres.migrate().await?;

    Ok(Service::new(
        PostgresMenuItemRepository::new(postgres.get_db()),
        PostgresPredictionRepository::new(postgres.get_db()),
        PostgresTrainingDataRepository::new(postgres.get_db()),
        PostgresHealthRepository::new(postgres.get_db()),
    ))
}
