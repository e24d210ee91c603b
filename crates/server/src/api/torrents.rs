//! Release library handlers: listing, details, deletion.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use packrat_core::library::{
    self, DeleteCapability, DeleteMethod, LibraryError, ReleaseDetails, ReleaseEntry,
};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FolderRequest {
    pub folder_path: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct TorrentListResponse {
    pub torrents: Vec<ReleaseEntry>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub method: DeleteMethod,
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

/// GET /torrents
pub async fn list_torrents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TorrentListResponse>, ApiError> {
    let config = state.load_config().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;
    let torrents = library::list_releases(&config)
        .await
        .map_err(library_error)?;
    let count = torrents.len();
    Ok(Json(TorrentListResponse { torrents, count }))
}

/// POST /torrent-details
pub async fn torrent_details(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FolderRequest>,
) -> Result<Json<ReleaseDetails>, ApiError> {
    library::release_details(state.parser(), state.prober(), &req.folder_path)
        .await
        .map(Json)
        .map_err(library_error)
}

/// DELETE /torrent
pub async fn delete_torrent(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FolderRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let config = state.load_config().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;
    let method = library::delete_release(&config, &req.folder_path)
        .await
        .map_err(library_error)?;
    Ok(Json(DeleteResponse {
        deleted: true,
        method,
    }))
}

/// GET /system/delete-capability
pub async fn delete_capability() -> Json<DeleteCapability> {
    Json(library::delete_capability())
}
