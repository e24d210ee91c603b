//! Intake and conflict-check handlers.
//!
//! `/parse` and `/parse-season` stage incoming media into the output
//! directory and return parsed facts plus probed metadata. The conflict
//! endpoints describe whether a prospective target folder already exists.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use packrat_core::library::{
    self, IntakeOutcome, LibraryError, SeasonIntakeOutcome,
};
use packrat_core::packager::ConflictResult;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FileRequest {
    pub filepath: String,
}

#[derive(Debug, Deserialize)]
pub struct FolderRequest {
    pub folder_path: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn library_error(e: LibraryError) -> ApiError {
    let status = if e.is_client_error() {
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

/// POST /parse
pub async fn parse_file(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FileRequest>,
) -> Result<Json<IntakeOutcome>, ApiError> {
    let config = load_config(&state)?;
    library::intake_file(&config, state.parser(), state.prober(), &req.filepath)
        .await
        .map(Json)
        .map_err(library_error)
}

/// POST /parse-season
pub async fn parse_season(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FolderRequest>,
) -> Result<Json<SeasonIntakeOutcome>, ApiError> {
    let config = load_config(&state)?;
    library::intake_season(&config, state.parser(), state.prober(), &req.folder_path)
        .await
        .map(Json)
        .map_err(library_error)
}

/// POST /check-conflict
pub async fn check_conflict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FileRequest>,
) -> Result<Json<ConflictResult>, ApiError> {
    let config = load_config(&state)?;
    library::check_file_conflict(&config, &req.filepath)
        .await
        .map(Json)
        .map_err(library_error)
}

/// POST /check-season-conflict
pub async fn check_season_conflict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FolderRequest>,
) -> Result<Json<ConflictResult>, ApiError> {
    let config = load_config(&state)?;
    library::check_season_conflict(&config, &req.folder_path)
        .await
        .map(Json)
        .map_err(library_error)
}
