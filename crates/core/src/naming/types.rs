use serde::{Deserialize, Serialize};

use crate::parser::ParsedFacts;

/// User-editable field set driving the template engine and NFO renderer.
///
/// String fields are display values; empty means absent. Numeric season and
/// episode fields stay numeric so the engine can apply width specifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseFields {
    /// Movie title or show name.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    /// Resolution tier, the `{quality}` placeholder.
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub video_codec: String,
    #[serde(default)]
    pub audio_codec: String,
    #[serde(default)]
    pub audio_channels: String,
    #[serde(default)]
    pub bit_depth: String,
    #[serde(default)]
    pub hdr_format: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub release_group: String,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub episode: Option<u32>,
    #[serde(default)]
    pub episode_title: String,
    #[serde(default)]
    pub episode_count: Option<usize>,
    #[serde(default)]
    pub total_size: String,
    #[serde(default)]
    pub tmdb_id: String,
    #[serde(default)]
    pub imdb_id: String,
    #[serde(default)]
    pub overview: String,
}

impl ReleaseFields {
    /// Seed fields from name facts; probe metadata and user edits layer on top.
    pub fn from_parsed(facts: &ParsedFacts) -> Self {
        Self {
            title: facts.title.clone().unwrap_or_default(),
            year: facts.year.map(|y| y.to_string()).unwrap_or_default(),
            resolution: facts.resolution.clone().unwrap_or_default(),
            source: facts.source.clone().unwrap_or_default(),
            video_codec: facts.video_codec.clone().unwrap_or_default(),
            audio_codec: facts.audio_codec.clone().unwrap_or_default(),
            release_group: facts.release_group.clone().unwrap_or_default(),
            season: facts.season,
            episode: facts.episode,
            episode_title: facts.episode_title.clone().unwrap_or_default(),
            ..Default::default()
        }
    }
}
