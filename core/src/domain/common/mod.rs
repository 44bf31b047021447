use std::path::PathBuf;

use crate::ml::ConfidenceStrategy;

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct TasteLogicConfig {
    pub database: DatabaseConfig,
    pub model: ModelConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub connect_timeout: u64,
    pub sslmode: String,
    pub application_name: String,
}

#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub artifact_path: PathBuf,
    pub version: String,
    pub confidence: ConfidenceStrategy,
}
