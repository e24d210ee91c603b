//! TMDB catalog handlers for release field enrichment.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use packrat_core::tmdb::{CatalogError, TmdbClient, TmdbMovie, TmdbSeason, TmdbSeries};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub year: Option<u16>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse<T> {
    pub results: Vec<T>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn catalog_error(e: CatalogError) -> ApiError {
    let status = match &e {
        CatalogError::NotConfigured(_) => StatusCode::BAD_REQUEST,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        CatalogError::ApiError { .. } | CatalogError::Http(_) => StatusCode::BAD_GATEWAY,
        CatalogError::ParseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn client(state: &AppState) -> Result<TmdbClient, ApiError> {
    let config = state.load_config().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;
    state.tmdb_client(&config).map_err(catalog_error)
}

/// POST /tmdb/search
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse<TmdbMovie>>, ApiError> {
    let client = client(&state)?;
    let results = client
        .search_movies(&req.query, req.year)
        .await
        .map_err(catalog_error)?;
    Ok(Json(SearchResponse { results }))
}

/// GET /tmdb/movie/{id}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<TmdbMovie>, ApiError> {
    let client = client(&state)?;
    client.get_movie(id).await.map(Json).map_err(catalog_error)
}

/// POST /tmdb/search-tv
pub async fn search_tv(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse<TmdbSeries>>, ApiError> {
    let client = client(&state)?;
    let results = client
        .search_tv(&req.query, req.year)
        .await
        .map_err(catalog_error)?;
    Ok(Json(SearchResponse { results }))
}

/// GET /tmdb/tv/{id}
pub async fn get_tv(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<TmdbSeries>, ApiError> {
    let client = client(&state)?;
    client.get_tv(id).await.map(Json).map_err(catalog_error)
}

/// GET /tmdb/tv/{id}/season/{season}
pub async fn get_tv_season(
    State(state): State<Arc<AppState>>,
    Path((id, season)): Path<(u32, u32)>,
) -> Result<Json<TmdbSeason>, ApiError> {
    let client = client(&state)?;
    client
        .get_tv_season(id, season)
        .await
        .map(Json)
        .map_err(catalog_error)
}
