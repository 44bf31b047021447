//! Model artifact I/O: the fitted pipeline serialized as MessagePack inside a
//! small versioned envelope, written to a single file that training
//! overwrites wholesale and inference loads once at startup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ml::{MlError, pipeline::DemandPipeline};

const ARTIFACT_FORMAT_VERSION: u8 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactEnvelope {
    format_version: u8,
    payload: Vec<u8>,
}

pub fn save(pipeline: &DemandPipeline, path: &Path) -> Result<(), MlError> {
    let payload = rmp_serde::to_vec(pipeline).map_err(|e| MlError::Encode(e.to_string()))?;
    let envelope = ArtifactEnvelope {
        format_version: ARTIFACT_FORMAT_VERSION,
        payload,
    };
    let bytes = rmp_serde::to_vec(&envelope).map_err(|e| MlError::Encode(e.to_string()))?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn load(path: &Path) -> Result<DemandPipeline, MlError> {
    let bytes = fs::read(path)?;
    let envelope: ArtifactEnvelope =
        rmp_serde::from_slice(&bytes).map_err(|e| MlError::Decode(e.to_string()))?;

    if envelope.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(MlError::UnsupportedVersion(envelope.format_version));
    }

    rmp_serde::from_slice(&envelope.payload).map_err(|e| MlError::Decode(e.to_string()))
}
