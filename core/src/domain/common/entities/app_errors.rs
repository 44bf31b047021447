use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Model artifact unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Not enough training data")]
    InsufficientTrainingData,

    #[error("Database error")]
    Database,

    #[error("Internal server error")]
    InternalServerError,
}
