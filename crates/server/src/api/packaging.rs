//! Preview and create handlers for the packaging pipeline.
//!
//! Preview endpoints render names, NFO content and warnings without touching
//! the filesystem. Create endpoints run the full pipeline under the
//! per-target-name lock and return a report with the final paths and the
//! torrent info hash.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use packrat_core::packager::{ReleasePreview, ReleaseReport};
use packrat_core::{PackagerError, ReleaseFields};

use crate::state::AppState;

/// Request body shared by all preview/create endpoints: the staged folder
/// plus the user-edited release fields, flattened alongside it.
#[derive(Debug, Deserialize)]
pub struct PackageRequest {
    pub folder_path: String,
    #[serde(flatten)]
    pub fields: ReleaseFields,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn packager_error(e: PackagerError) -> ApiError {
    let status = if e.is_conflict() {
        StatusCode::CONFLICT
    } else if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn load_config(state: &AppState) -> Result<packrat_core::Config, ApiError> {
    state.load_config().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })
}

/// POST /preview-torrent
pub async fn preview_movie(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PackageRequest>,
) -> Result<Json<ReleasePreview>, ApiError> {
    let config = load_config(&state)?;
    state
        .packager()
        .preview_movie(&config, &req.folder_path, &req.fields)
        .await
        .map(Json)
        .map_err(packager_error)
}

/// POST /preview-episode-torrent
pub async fn preview_episode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PackageRequest>,
) -> Result<Json<ReleasePreview>, ApiError> {
    let config = load_config(&state)?;
    state
        .packager()
        .preview_episode(&config, &req.folder_path, &req.fields)
        .await
        .map(Json)
        .map_err(packager_error)
}

/// POST /preview-season-torrent
pub async fn preview_season(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PackageRequest>,
) -> Result<Json<ReleasePreview>, ApiError> {
    let config = load_config(&state)?;
    state
        .packager()
        .preview_season(&config, &req.folder_path, &req.fields)
        .await
        .map(Json)
        .map_err(packager_error)
}

/// POST /create-torrent
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PackageRequest>,
) -> Result<Json<ReleaseReport>, ApiError> {
    let config = load_config(&state)?;
    state
        .packager()
        .create_movie(&config, &req.folder_path, &req.fields)
        .await
        .map(Json)
        .map_err(packager_error)
}

/// POST /create-episode-torrent
pub async fn create_episode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PackageRequest>,
) -> Result<Json<ReleaseReport>, ApiError> {
    let config = load_config(&state)?;
    state
        .packager()
        .create_episode(&config, &req.folder_path, &req.fields)
        .await
        .map(Json)
        .map_err(packager_error)
}

/// POST /create-season-torrent
pub async fn create_season(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PackageRequest>,
) -> Result<Json<ReleaseReport>, ApiError> {
    let config = load_config(&state)?;
    state
        .packager()
        .create_season(&config, &req.folder_path, &req.fields)
        .await
        .map(Json)
        .map_err(packager_error)
}
