use serde::{Deserialize, Serialize};

/// Facts recognized in a file or folder name.
///
/// All fields are optional; absence means the name carried no such marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedFacts {
    /// Title or show name with separators normalized to spaces.
    pub title: Option<String>,
    pub year: Option<u16>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    /// Words between the episode marker and the next technical tag.
    pub episode_title: Option<String>,
    /// Resolution tier, e.g. "1080p".
    pub resolution: Option<String>,
    /// Source tag, e.g. "BluRay", "WEB-DL".
    pub source: Option<String>,
    /// Canonical video codec tag, e.g. "x265".
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    /// Release group from the trailing "-GROUP" suffix.
    pub release_group: Option<String>,
    /// File extension when the parsed name had one.
    pub container: Option<String>,
    /// True when the name reads as a movie (no episode markers, year present).
    pub movie: bool,
}

impl ParsedFacts {
    pub fn has_season(&self) -> bool {
        self.season.is_some()
    }

    pub fn has_episode(&self) -> bool {
        self.episode.is_some()
    }
}
