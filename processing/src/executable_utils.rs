use axum::{
    Router,
    extract::{Json, Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use common::config::{BackendConfig, Config, SERVER_ADDRESS_ENV};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use serde::de::DeserializeOwned;
use std::{error::Error, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::{
    error::ProcessError,
    model::{Importable, MessageResponse, PointsResponse, ProcessedResponse},
    processor::Processor,
    scorers::Scorer,
};

pub const NOT_FOUND_MESSAGE: &str = "No receipt found for that ID.";
pub const INVALID_MESSAGE: &str = "The receipt is invalid.";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "receipts/config/dev.yaml")]
    pub config: String,
}

/// Parses the command line, loads `.env` and the config file, and starts tracing.
pub fn initialize_executable() -> Result<Config, Box<dyn Error + Send + Sync>> {
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();
    let config = Config::load(&args.config)?
        .with_server_address_override(std::env::var(SERVER_ADDRESS_ENV).ok());

    initialize_tracing(&config.backend.log_level);
    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {:?}", path);
    }
    tracing::info!(config_path = %args.config, "Loaded config: {:?}", config);

    Ok(config)
}

/// `RUST_LOG` wins over the configured level when it is set.
pub fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

pub fn install_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

pub struct AppState<I, S>
where
    I: Importable,
    S: Scorer<I::Validated>,
{
    processor: Arc<Processor<I, S>>,
    metrics: Option<PrometheusHandle>,
}

impl<I, S> AppState<I, S>
where
    I: Importable,
    S: Scorer<I::Validated>,
{
    pub fn new(processor: Arc<Processor<I, S>>, metrics: Option<PrometheusHandle>) -> Self {
        Self { processor, metrics }
    }
}

impl<I, S> Clone for AppState<I, S>
where
    I: Importable,
    S: Scorer<I::Validated>,
{
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
            metrics: self.metrics.clone(),
        }
    }
}

pub fn build_router<I, S>(
    state: AppState<I, S>,
    cors_origin: Option<&str>,
) -> Result<Router, Box<dyn Error + Send + Sync>>
where
    I: Importable + DeserializeOwned + 'static,
    S: Scorer<I::Validated> + 'static,
{
    let mut app = Router::new()
        .route("/receipts/process", post(process_receipt::<I, S>))
        .route("/receipts/{id}/points", get(get_points::<I, S>))
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics::<I, S>))
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = cors_origin {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin.parse::<header::HeaderValue>()?)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    Ok(app.with_state(state))
}

pub async fn run_backend<I, S>(
    config: BackendConfig,
    state: AppState<I, S>,
) -> Result<(), Box<dyn Error + Send + Sync>>
where
    I: Importable + DeserializeOwned + 'static,
    S: Scorer<I::Validated> + 'static,
{
    let app = build_router(state, config.cors_origin.as_deref())?;

    tracing::info!("Starting backend service at {}", config.server_address);
    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
        .into_response()
}

pub async fn process_receipt<I, S>(
    State(state): State<AppState<I, S>>,
    payload: Result<Json<I>, JsonRejection>,
) -> Response
where
    I: Importable + DeserializeOwned + 'static,
    S: Scorer<I::Validated> + 'static,
{
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected unparseable receipt");
            return message(
                StatusCode::BAD_REQUEST,
                format!("{} {}", INVALID_MESSAGE, rejection.body_text()),
            );
        }
    };

    match state.processor.submit(&payload).await {
        Ok(id) => (StatusCode::CREATED, Json(ProcessedResponse { id })).into_response(),
        Err(e) if e.is_client_error() => {
            message(StatusCode::BAD_REQUEST, format!("{} {}", INVALID_MESSAGE, e))
        }
        Err(e) => internal_error(e),
    }
}

pub async fn get_points<I, S>(
    State(state): State<AppState<I, S>>,
    Path(id): Path<String>,
) -> Response
where
    I: Importable + 'static,
    S: Scorer<I::Validated> + 'static,
{
    match state.processor.lookup(&id).await {
        Ok(Some(points)) => (StatusCode::OK, Json(PointsResponse { points })).into_response(),
        Ok(None) => message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        Err(e) => internal_error(e),
    }
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

pub async fn render_metrics<I, S>(State(state): State<AppState<I, S>>) -> Response
where
    I: Importable + 'static,
    S: Scorer<I::Validated> + 'static,
{
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => message(StatusCode::NOT_FOUND, "Metrics are not enabled."),
    }
}

fn internal_error(e: ProcessError) -> Response {
    tracing::error!(error = %e, "Failed to process request");
    message(StatusCode::INTERNAL_SERVER_ERROR, "Internal error.")
}
