use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tastelogic_core::domain::common::{DatabaseConfig, ModelConfig, TasteLogicConfig};
use tastelogic_core::ml::ConfidenceStrategy;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "TasteLogic demand forecasting service")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP API server (the default when no command is given)
    Serve,
    /// Generate and persist forecasts for every available menu item
    Forecast {
        /// How many future hour slots to forecast
        #[arg(long, default_value_t = 24)]
        hours_ahead: u32,

        /// Upserts per transaction commit
        #[arg(long, default_value_t = 200)]
        commit_every: u32,

        /// Per-transaction statement timeout in milliseconds
        #[arg(long, default_value_t = 60_000)]
        statement_timeout_ms: i64,
    },
    /// Train the demand model on historical orders and write the artifact
    Train,
}

#[derive(Debug, Clone, Parser)]
pub struct ServerArgs {
    #[arg(long, env = "PORT", default_value = "4000")]
    pub port: u16,

    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct DatabaseArgs {
    #[arg(long, env = "DB_HOST", default_value = "127.0.0.1")]
    pub db_host: String,

    #[arg(long, env = "DB_PORT", default_value = "5432")]
    pub db_port: u16,

    #[arg(long, env = "DB_USER", default_value = "tastelogic_business")]
    pub db_user: String,

    #[arg(long, env = "DB_PASSWORD", default_value = "tastelogic_business")]
    pub db_password: String,

    #[arg(long, env = "DB_NAME", default_value = "tastelogic")]
    pub db_name: String,

    #[arg(long, env = "DB_CONNECT_TIMEOUT", default_value = "10")]
    pub db_connect_timeout: u64,

    #[arg(long, env = "DB_SSLMODE", default_value = "require")]
    pub db_sslmode: String,

    #[arg(long, env = "DB_APP_NAME", default_value = "tastelogic")]
    pub db_app_name: String,
}

#[derive(Debug, Clone, Parser)]
pub struct ModelArgs {
    #[arg(long, env = "MODEL_PATH", default_value = "demand_model.bin")]
    pub model_path: PathBuf,

    #[arg(long, env = "MODEL_VERSION", default_value = "v1")]
    pub model_version: String,

    /// `interval` scores confidence from the ensemble spread; `fixed` always
    /// reports 80.
    #[arg(long, env = "CONFIDENCE_STRATEGY", default_value = "interval")]
    pub confidence_strategy: String,
}

impl Args {
    pub fn config(&self) -> Result<TasteLogicConfig, anyhow::Error> {
        let confidence = self
            .model
            .confidence_strategy
            .parse::<ConfidenceStrategy>()
            .map_err(|e| anyhow::anyhow!(e))?;

        Ok(TasteLogicConfig {
            database: DatabaseConfig {
                host: self.database.db_host.clone(),
                port: self.database.db_port,
                username: self.database.db_user.clone(),
                password: self.database.db_password.clone(),
                name: self.database.db_name.clone(),
                connect_timeout: self.database.db_connect_timeout,
                sslmode: self.database.db_sslmode.clone(),
                application_name: self.database.db_app_name.clone(),
            },
            model: ModelConfig {
                artifact_path: self.model.model_path.clone(),
                version: self.model.model_version.clone(),
                confidence,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_into_a_config() {
        let args = Args::parse_from(["tastelogic"]);
        let config = args.config().unwrap();

        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.name, "tastelogic");
        assert_eq!(config.model.confidence, ConfidenceStrategy::default());
        assert!(args.command.is_none());
    }

    #[test]
    fn forecast_flags_override_the_defaults() {
        let args = Args::parse_from([
            "tastelogic",
            "forecast",
            "--hours-ahead",
            "6",
            "--commit-every",
            "50",
        ]);

        match args.command {
            Some(Command::Forecast {
                hours_ahead,
                commit_every,
                statement_timeout_ms,
            }) => {
                assert_eq!(hours_ahead, 6);
                assert_eq!(commit_every, 50);
                assert_eq!(statement_timeout_ms, 60_000);
            }
            other => panic!("expected forecast command, got {other:?}"),
        }
    }

    #[test]
    fn an_unknown_confidence_strategy_is_rejected() {
        let mut args = Args::parse_from(["tastelogic"]);
        args.model.confidence_strategy = "bogus".to_string();

        assert!(args.config().is_err());
    }
}
