use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tastelogic_core::application::create_service;
use tastelogic_core::domain::forecast::ports::ForecastService;
use tastelogic_core::domain::forecast::value_objects::BatchRunParams;
use tastelogic_core::domain::training::ports::TrainingService;
use tastelogic_core::domain::training::value_objects::TrainParams;
use tastelogic_core::ml::DemandModel;

use crate::application::http::server::http_server;
use crate::args::{Args, Command};

mod application;
mod args;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Arc::new(Args::parse());

    match args.command.clone().unwrap_or(Command::Serve) {
        Command::Serve => serve(args).await,
        Command::Forecast {
            hours_ahead,
            commit_every,
            statement_timeout_ms,
        } => {
            forecast(
                args,
                BatchRunParams {
                    hours_ahead,
                    commit_every,
                    statement_timeout_ms,
                },
            )
            .await
        }
        Command::Train => train(args).await,
    }
}

async fn serve(args: Arc<Args>) -> Result<(), anyhow::Error> {
    let state = http_server::state(args.clone()).await?;
    let router = http_server::router(state)?;

    let listener = TcpListener::bind(("0.0.0.0", args.server.port)).await?;
    info!("listening on 0.0.0.0:{}", args.server.port);
    axum::serve(listener, router).await?;

    Ok(())
}

async fn forecast(args: Arc<Args>, params: BatchRunParams) -> Result<(), anyhow::Error> {
    let config = args.config()?;
    let service = create_service(config.clone()).await?;
    let model = DemandModel::load(&config.model.artifact_path, config.model.confidence)?;

    let report = service.run_for_next_hours(&model, params).await?;
    info!(
        menu_items = report.menu_items,
        upserts = report.upserts,
        commits = report.commits,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "forecast run finished"
    );

    Ok(())
}

async fn train(args: Arc<Args>) -> Result<(), anyhow::Error> {
    let config = args.config()?;
    let service = create_service(config.clone()).await?;

    let report = service
        .train_and_save(TrainParams {
            artifact_path: config.model.artifact_path,
            model_version: config.model.version,
        })
        .await?;
    info!(
        rows = report.rows,
        rmse = report.metrics.rmse,
        r2 = report.metrics.r2,
        artifact = %report.artifact_path.display(),
        "model trained"
    );

    Ok(())
}
