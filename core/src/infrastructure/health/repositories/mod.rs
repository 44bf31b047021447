pub mod health_repository;

pub use health_repository::PostgresHealthRepository;
