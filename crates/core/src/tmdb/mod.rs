//! TMDB (The Movie Database) catalog client.
//!
//! Enrichment only: search and details for movies and TV series feed the
//! user-editable release fields. TMDB requires an API key.

mod client;
mod types;

use thiserror::Error;

pub use client::TmdbClient;
pub use types::{TmdbEpisode, TmdbMovie, TmdbSeason, TmdbSeasonSummary, TmdbSeries};

/// Errors from the TMDB catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
