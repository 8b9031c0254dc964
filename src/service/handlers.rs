//! HTTP request handlers

use anyhow::{Context, Result};
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::pipeline::{analyze, load_decision_table_from_bytes, AnalysisReport, Method};
use crate::service::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Run the requested analysis on an uploaded file.
///
/// Always answers 200; failures are reported as `{"error": ...}`.
pub async fn process(State(state): State<AppState>, multipart: Multipart) -> Json<Value> {
    match run_process(&state, multipart).await {
        Ok(value) => Json(value),
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "Processing failed");
            Json(json!({ "error": format!("{:#}", e) }))
        }
    }
}

async fn run_process(state: &AppState, mut multipart: Multipart) -> Result<Value> {
    let mut file: Option<Vec<u8>> = None;
    let mut method: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .context("Malformed multipart body")?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let bytes = field.bytes().await.context("Failed to read uploaded file")?;
                file = Some(bytes.to_vec());
            }
            Some("method") => {
                method = Some(field.text().await.context("Failed to read method field")?);
            }
            _ => {}
        }
    }

    let bytes = file.context("Missing 'file' field")?;
    let method: Method = method.context("Missing 'method' field")?.parse()?;

    tracing::info!(method = %method, bytes = bytes.len(), "Processing upload");

    let load = state.load.clone();
    let options = state.analysis;
    let report: AnalysisReport = tokio::task::spawn_blocking(move || -> Result<AnalysisReport> {
        let table = load_decision_table_from_bytes(&bytes, &load)?;
        Ok(analyze(method, &table, &options))
    })
    .await
    .context("Analysis task failed")??;

    tracing::info!(
        method = %method,
        removed = report.result.removed_objects().len(),
        "Processing complete"
    );

    Ok(serde_json::to_value(&report)?)
}
