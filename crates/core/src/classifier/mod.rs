//! Media kind classification.
//!
//! A fresh single file is classified from its own name facts alone. An
//! existing folder gets two overrides first: several video files always mean
//! a season pack, and a folder name with a season marker but no episode
//! marker means a season pack even when the representative file inside
//! parses as a single episode.

use serde::{Deserialize, Serialize};

use crate::parser::ParsedFacts;

/// The kind of release an item packages into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Episode,
    SeasonPack,
    Unknown,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Episode => "episode",
            MediaKind::SeasonPack => "season",
            MediaKind::Unknown => "unknown",
        }
    }
}

/// Classify a single item from its name facts. First match wins.
pub fn classify(facts: &ParsedFacts) -> MediaKind {
    if facts.movie {
        MediaKind::Movie
    } else if facts.has_season() && !facts.has_episode() {
        MediaKind::SeasonPack
    } else if facts.has_episode() {
        MediaKind::Episode
    } else {
        MediaKind::Unknown
    }
}

/// Re-classify an existing folder.
///
/// `file_facts` come from a representative video file inside the folder,
/// `folder_facts` from the folder name itself, `video_file_count` from an
/// enumeration of the folder. The overrides run before the single-file rule
/// because one episode file inside a season folder would otherwise win.
pub fn classify_folder(
    file_facts: &ParsedFacts,
    folder_facts: &ParsedFacts,
    video_file_count: usize,
) -> MediaKind {
    if video_file_count > 1 {
        return MediaKind::SeasonPack;
    }
    if folder_facts.has_season() && !folder_facts.has_episode() {
        return MediaKind::SeasonPack;
    }
    classify(file_facts)
}
