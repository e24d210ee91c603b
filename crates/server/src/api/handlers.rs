//! Health, config and metrics handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use packrat_core::{validate_config, Config, SanitizedConfig};

use crate::metrics::render_metrics;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SanitizedConfig>, (StatusCode, Json<ErrorResponse>)> {
    match state.sanitized_config() {
        Ok(config) => Ok(Json(config)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// Validate and persist a full replacement config, then echo the sanitized
/// result. Subsequent requests pick up the new values immediately.
pub async fn put_config(
    State(state): State<Arc<AppState>>,
    Json(config): Json<Config>,
) -> Result<Json<SanitizedConfig>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = validate_config(&config) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ));
    }

    if let Err(e) = state.save_config(&config) {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        ));
    }

    info!(path = %state.config_path().display(), "config updated");
    Ok(Json(SanitizedConfig::from(&config)))
}

pub async fn metrics() -> impl IntoResponse {
    render_metrics()
}
