pub mod training_data_repository;

pub use training_data_repository::PostgresTrainingDataRepository;
