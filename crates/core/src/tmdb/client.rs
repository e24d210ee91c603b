//! reqwest-backed TMDB API client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::types::{
    year_of, TmdbEpisode, TmdbMovie, TmdbSeason, TmdbSeasonSummary, TmdbSeries,
};
use super::CatalogError;
use crate::config::TmdbConfig;

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Search for movies, optionally constrained to a release year.
    pub async fn search_movies(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> Result<Vec<TmdbMovie>, CatalogError> {
        let url = format!("{}/search/movie", self.base_url);
        debug!("TMDB movie search: query='{}', year={:?}", query, year);

        let mut request = self.client.get(&url).query(&[
            ("api_key", self.api_key.as_str()),
            ("query", query),
            ("include_adult", "false"),
        ]);
        if let Some(y) = year {
            request = request.query(&[("year", &y.to_string())]);
        }

        let response = check_status(request.send().await?).await?;
        let search: SearchResponse<MovieResult> = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse movie search response: {}", e))
        })?;

        Ok(search.results.into_iter().take(10).map(Into::into).collect())
    }

    /// Get a specific movie by TMDB id, including its IMDb id.
    pub async fn get_movie(&self, tmdb_id: u32) -> Result<TmdbMovie, CatalogError> {
        let url = format!("{}/movie/{}", self.base_url, tmdb_id);
        debug!("TMDB get movie: id={}", tmdb_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", &self.api_key)])
            .send()
            .await?;
        if response.status() == 404 {
            return Err(CatalogError::NotFound(format!("Movie ID {}", tmdb_id)));
        }
        let response = check_status(response).await?;

        let details: MovieDetails = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse movie response: {}", e))
        })?;
        Ok(details.into())
    }

    /// Search for TV series, optionally constrained to a first-air year.
    pub async fn search_tv(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> Result<Vec<TmdbSeries>, CatalogError> {
        let url = format!("{}/search/tv", self.base_url);
        debug!("TMDB TV search: query='{}'", query);

        let mut request = self.client.get(&url).query(&[
            ("api_key", self.api_key.as_str()),
            ("query", query),
            ("include_adult", "false"),
        ]);
        if let Some(y) = year {
            request = request.query(&[("first_air_date_year", &y.to_string())]);
        }

        let response = check_status(request.send().await?).await?;
        let search: SearchResponse<TvResult> = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse TV search response: {}", e))
        })?;

        Ok(search.results.into_iter().take(10).map(Into::into).collect())
    }

    /// Get a specific TV series by TMDB id. A second call fetches its
    /// external ids so the IMDb id is available for the NFO.
    pub async fn get_tv(&self, tmdb_id: u32) -> Result<TmdbSeries, CatalogError> {
        let url = format!("{}/tv/{}", self.base_url, tmdb_id);
        debug!("TMDB get TV: id={}", tmdb_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", &self.api_key)])
            .send()
            .await?;
        if response.status() == 404 {
            return Err(CatalogError::NotFound(format!("TV series ID {}", tmdb_id)));
        }
        let response = check_status(response).await?;

        let details: TvDetails = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse TV response: {}", e))
        })?;

        let mut series: TmdbSeries = details.into();
        series.imdb_id = self.tv_imdb_id(tmdb_id).await;
        Ok(series)
    }

    /// Get a season's episode list.
    pub async fn get_tv_season(
        &self,
        tmdb_id: u32,
        season: u32,
    ) -> Result<TmdbSeason, CatalogError> {
        let url = format!("{}/tv/{}/season/{}", self.base_url, tmdb_id, season);
        debug!("TMDB get season: series={}, season={}", tmdb_id, season);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", &self.api_key)])
            .send()
            .await?;
        if response.status() == 404 {
            return Err(CatalogError::NotFound(format!(
                "TV series {} season {}",
                tmdb_id, season
            )));
        }
        let response = check_status(response).await?;

        let details: SeasonDetails = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse season response: {}", e))
        })?;
        Ok(details.into())
    }

    /// Best effort; TV details do not embed external ids.
    async fn tv_imdb_id(&self, tmdb_id: u32) -> Option<String> {
        let url = format!("{}/tv/{}/external_ids", self.base_url, tmdb_id);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", &self.api_key)])
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        let ids: ExternalIds = response.json().await.ok()?;
        ids.imdb_id.filter(|id| !id.is_empty())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
    let status = response.status();
    if status == 401 {
        return Err(CatalogError::NotConfigured(
            "Invalid TMDB API key".to_string(),
        ));
    }
    if status == 429 {
        return Err(CatalogError::RateLimitExceeded);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CatalogError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(response)
}

// ============================================================================
// TMDB API response types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct MovieResult {
    id: u32,
    title: String,
    original_title: Option<String>,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct MovieDetails {
    id: u32,
    title: String,
    original_title: Option<String>,
    release_date: Option<String>,
    runtime: Option<u32>,
    imdb_id: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    #[serde(default)]
    genres: Vec<Genre>,
    vote_average: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct Genre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TvResult {
    id: u32,
    name: String,
    original_name: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct TvDetails {
    id: u32,
    name: String,
    original_name: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    number_of_seasons: Option<u32>,
    #[serde(default)]
    seasons: Vec<SeasonResult>,
    #[serde(default)]
    genres: Vec<Genre>,
    vote_average: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct SeasonResult {
    season_number: u32,
    name: Option<String>,
    episode_count: Option<u32>,
    air_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeasonDetails {
    season_number: u32,
    name: Option<String>,
    #[serde(default)]
    episodes: Vec<EpisodeResult>,
}

#[derive(Debug, Deserialize)]
struct EpisodeResult {
    episode_number: u32,
    name: String,
    overview: Option<String>,
    runtime: Option<u32>,
    air_date: Option<String>,
    vote_average: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ExternalIds {
    imdb_id: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<MovieResult> for TmdbMovie {
    fn from(r: MovieResult) -> Self {
        Self {
            id: r.id,
            title: r.title,
            original_title: r.original_title,
            year: year_of(r.release_date.as_deref()),
            overview: r.overview,
            runtime_minutes: None,
            imdb_id: None,
            poster_path: r.poster_path,
            vote_average: r.vote_average,
            genres: Vec::new(),
        }
    }
}

impl From<MovieDetails> for TmdbMovie {
    fn from(d: MovieDetails) -> Self {
        Self {
            id: d.id,
            title: d.title,
            original_title: d.original_title,
            year: year_of(d.release_date.as_deref()),
            overview: d.overview,
            runtime_minutes: d.runtime,
            imdb_id: d.imdb_id.filter(|id| !id.is_empty()),
            poster_path: d.poster_path,
            vote_average: d.vote_average,
            genres: d.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

impl From<TvResult> for TmdbSeries {
    fn from(r: TvResult) -> Self {
        Self {
            id: r.id,
            name: r.name,
            original_name: r.original_name,
            year: year_of(r.first_air_date.as_deref()),
            overview: r.overview,
            imdb_id: None,
            poster_path: r.poster_path,
            vote_average: r.vote_average,
            genres: Vec::new(),
            number_of_seasons: 0,
            seasons: Vec::new(),
        }
    }
}

impl From<TvDetails> for TmdbSeries {
    fn from(d: TvDetails) -> Self {
        Self {
            id: d.id,
            name: d.name,
            original_name: d.original_name,
            year: year_of(d.first_air_date.as_deref()),
            overview: d.overview,
            imdb_id: None,
            poster_path: d.poster_path,
            vote_average: d.vote_average,
            genres: d.genres.into_iter().map(|g| g.name).collect(),
            number_of_seasons: d.number_of_seasons.unwrap_or(0),
            seasons: d
                .seasons
                .into_iter()
                .filter(|s| s.season_number > 0)
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<SeasonResult> for TmdbSeasonSummary {
    fn from(s: SeasonResult) -> Self {
        Self {
            season_number: s.season_number,
            name: s.name,
            episode_count: s.episode_count.unwrap_or(0),
            air_date: s.air_date,
        }
    }
}

impl From<SeasonDetails> for TmdbSeason {
    fn from(d: SeasonDetails) -> Self {
        Self {
            season_number: d.season_number,
            name: d.name,
            episodes: d.episodes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<EpisodeResult> for TmdbEpisode {
    fn from(e: EpisodeResult) -> Self {
        Self {
            episode_number: e.episode_number,
            name: e.name,
            overview: e.overview,
            air_date: e.air_date,
            runtime_minutes: e.runtime,
            vote_average: e.vote_average,
        }
    }
}
