//! HTTP service exposing both analysis methods
//!
//! `POST /process` takes a multipart upload with a `file` field (delimited
//! text) and a `method` field (`qualitative` or `quantitative`) and answers
//! with the analysis report. Failures never surface as transport errors:
//! they come back as `{"error": "<message>"}`.
//!
//! Every request loads its own table; the only shared state is the
//! read-only configuration.

mod handlers;

pub use handlers::*;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method as HttpMethod},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::pipeline::{AnalysisOptions, LoadOptions};

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub addr: SocketAddr,
    pub allowed_origin: String,
    pub load: LoadOptions,
    pub analysis: AnalysisOptions,
}

/// Shared, read-only request state
#[derive(Debug, Clone)]
pub struct AppState {
    pub load: Arc<LoadOptions>,
    pub analysis: AnalysisOptions,
}

impl AppState {
    pub fn new(load: LoadOptions, analysis: AnalysisOptions) -> Self {
        Self {
            load: Arc::new(load),
            analysis,
        }
    }
}

/// Build the router without CORS, for embedding and tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/process", post(process))
        .with_state(state)
}

fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin: HeaderValue = allowed_origin
        .parse()
        .with_context(|| format!("Invalid CORS origin: {}", allowed_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([HttpMethod::GET, HttpMethod::POST, HttpMethod::OPTIONS])
        .allow_headers(Any))
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: ServiceConfig) -> Result<()> {
    let state = AppState::new(config.load.clone(), config.analysis);
    let app = router(state)
        .layer(cors_layer(&config.allowed_origin)?)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    tracing::info!(
        addr = %config.addr,
        origin = %config.allowed_origin,
        "Roughcut service listening"
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
