pub mod db;
pub mod forecast;
pub mod health;
pub mod menu_item;
pub mod training;

pub use forecast::repositories::PostgresPredictionRepository;
pub use health::repositories::PostgresHealthRepository;
pub use menu_item::repositories::PostgresMenuItemRepository;
pub use training::repositories::PostgresTrainingDataRepository;
