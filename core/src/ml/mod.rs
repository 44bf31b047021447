//! Demand model internals: one-hot feature encoding, a bagged ensemble of
//! CART regression trees, and artifact (de)serialization.
//!
//! Training is deterministic for a fixed seed. The artifact is a versioned
//! MessagePack envelope consumed by both the API server and the batch runner.

use thiserror::Error;

use crate::domain::common::entities::app_errors::CoreError;

pub mod artifact;
pub mod encoder;
pub mod forest;
pub mod metrics;
pub mod pipeline;
pub mod tree;

pub use encoder::FeatureEncoder;
pub use forest::RandomForestRegressor;
pub use metrics::RegressionMetrics;
pub use pipeline::{ConfidenceStrategy, DemandModel, DemandPipeline, Inference};
pub use tree::RegressionTree;

#[derive(Debug, Error)]
pub enum MlError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode model artifact: {0}")]
    Encode(String),

    #[error("failed to decode model artifact: {0}")]
    Decode(String),

    #[error("unsupported model artifact format version: {0}")]
    UnsupportedVersion(u8),

    #[error("model artifact contains an empty ensemble")]
    EmptyModel,
}

impl From<MlError> for CoreError {
    fn from(err: MlError) -> Self {
        CoreError::ModelUnavailable(err.to_string())
    }
}
