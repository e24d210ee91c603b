//! Listing and inspection of existing release folders.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::LibraryError;
use crate::classifier::{classify_folder, MediaKind};
use crate::config::{expand_tilde, Config};
use crate::packager::{find_first_video, find_video_files};
use crate::parser::{NameParser, ParsedFacts};
use crate::probe::{gather, MetadataFacts, Prober};
use crate::torrent::{inspect_torrent, TorrentDetails};

/// One release folder under the output directory.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseEntry {
    pub name: String,
    pub path: PathBuf,
    pub file_count: usize,
}

/// Full inspection of one release folder.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseDetails {
    /// The representative video file, or a synthesized name when the
    /// folder holds none.
    pub filename: String,
    pub parsed: ParsedFacts,
    pub metadata: MetadataFacts,
    pub media_type: MediaKind,
    pub target_folder: PathBuf,
    pub files: Vec<String>,
    /// Parsed sibling .torrent, when one has been written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub torrent: Option<TorrentDetails>,
}

/// List all release folders, sorted case-insensitively by name.
pub async fn list_releases(config: &Config) -> Result<Vec<ReleaseEntry>, LibraryError> {
    let output_dir = config.output_dir();
    if !output_dir.exists() {
        return Ok(Vec::new());
    }

    let mut releases = Vec::new();
    let mut entries = tokio::fs::read_dir(&output_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let mut file_count = 0usize;
        let mut children = tokio::fs::read_dir(&path).await?;
        while let Some(child) = children.next_entry().await? {
            if child.file_type().await?.is_file() {
                file_count += 1;
            }
        }
        releases.push(ReleaseEntry {
            name,
            path,
            file_count,
        });
    }
    releases.sort_by_key(|r| r.name.to_lowercase());
    Ok(releases)
}

/// Inspect an existing release folder: facts from the representative video
/// file, folder-context re-classification, normalized metadata, file listing
/// and the sibling .torrent if present.
pub async fn release_details(
    parser: &dyn NameParser,
    prober: &dyn Prober,
    folder_path: &str,
) -> Result<ReleaseDetails, LibraryError> {
    let folder = expand_tilde(Path::new(folder_path));
    if !folder.is_dir() {
        return Err(LibraryError::FolderNotFound(folder));
    }

    let video_files = find_video_files(&folder).await.map_err(LibraryError::from)?;
    let video_file_count = video_files.len();
    let first_video = find_first_video(&folder).await.map_err(LibraryError::from)?;

    let folder_name = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Without a video file, classify from a name synthesized off the folder.
    let filename = match &first_video {
        Some((name, _)) => name.clone(),
        None => format!("{}.mp4", folder_name),
    };

    let parsed = parser.parse(&filename);
    let folder_parsed = parser.parse(&folder_name);
    let media_type = classify_folder(&parsed, &folder_parsed, video_file_count);

    let metadata = match &first_video {
        Some((name, _)) => gather(prober, &folder.join(name)).await,
        None => MetadataFacts::default(),
    };

    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(&folder).await?;
    while let Some(entry) = entries.next_entry().await? {
        files.push(entry.file_name().to_string_lossy().into_owned());
    }
    files.sort();

    let torrent = sibling_torrent(&folder, &folder_name).await;

    Ok(ReleaseDetails {
        filename,
        parsed,
        metadata,
        media_type,
        target_folder: folder,
        files,
        torrent,
    })
}

/// Parse `<parent>/<name>.torrent` when it exists. Best effort.
async fn sibling_torrent(folder: &Path, name: &str) -> Option<TorrentDetails> {
    let path = folder.parent()?.join(format!("{}.torrent", name));
    let bytes = tokio::fs::read(&path).await.ok()?;
    inspect_torrent(&bytes).ok()
}
