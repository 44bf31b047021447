pub mod prediction_repository;
pub mod prediction_writer;

pub use prediction_repository::PostgresPredictionRepository;
pub use prediction_writer::PostgresPredictionWriter;
