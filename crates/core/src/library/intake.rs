//! Intake: stage downloaded media into the output directory.
//!
//! A single file gets its own folder named after the file's stem; a season
//! folder is staged wholesale. Both write an initial NFO from the parsed
//! facts, which a later create operation replaces with the edited one.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::LibraryError;
use crate::classifier::{classify, MediaKind};
use crate::config::{expand_tilde, Config};
use crate::nfo;
use crate::packager::{check_target, find_video_files, ConflictResult, IncomingDescriptor};
use crate::parser::{NameParser, ParsedFacts};
use crate::probe::{format_file_size, gather, MetadataFacts, Prober};

/// Result of staging a single file.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeOutcome {
    pub filename: String,
    pub parsed: ParsedFacts,
    pub metadata: MetadataFacts,
    pub media_type: MediaKind,
    pub target_folder: PathBuf,
    pub nfo_path: PathBuf,
}

/// One staged file with its display size.
#[derive(Debug, Clone, Serialize)]
pub struct FileSizeEntry {
    pub name: String,
    pub size: String,
}

/// Result of staging a season folder.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonIntakeOutcome {
    pub folder_name: String,
    /// Facts from the first video file, representative of the season.
    pub parsed: ParsedFacts,
    pub metadata: MetadataFacts,
    pub media_type: MediaKind,
    pub target_folder: PathBuf,
    pub video_files: Vec<FileSizeEntry>,
    pub episode_count: usize,
    pub total_size: String,
    pub nfo_path: PathBuf,
}

/// Stage a single media file: parse, probe, copy into its release folder,
/// write an initial NFO.
pub async fn intake_file(
    config: &Config,
    parser: &dyn NameParser,
    prober: &dyn Prober,
    filepath: &str,
) -> Result<IntakeOutcome, LibraryError> {
    let filepath = expand_tilde(Path::new(filepath));
    if !filepath.is_file() {
        return Err(LibraryError::FileNotFound(filepath));
    }

    let filename = file_name(&filepath);
    let base_name = file_stem(&filename);

    let parsed = parser.parse(&filename);
    let metadata = gather(prober, &filepath).await;
    let media_type = classify(&parsed);

    let target_folder = config.output_dir().join(&base_name);
    tokio::fs::create_dir_all(&target_folder).await?;

    let target_file = target_folder.join(&filename);
    if filepath != target_file {
        // Copy truncates an existing stale file.
        tokio::fs::copy(&filepath, &target_file).await?;
    }

    let nfo_path = target_folder.join(format!("{}.NFO", base_name));
    let nfo_content = nfo::render_parsed(&config.nfo, &parsed, &filename, media_type);
    tokio::fs::write(&nfo_path, nfo_content).await?;

    Ok(IntakeOutcome {
        filename,
        parsed,
        metadata,
        media_type,
        target_folder,
        nfo_path,
    })
}

/// Stage a folder of episode files for season pack creation.
pub async fn intake_season(
    config: &Config,
    parser: &dyn NameParser,
    prober: &dyn Prober,
    folder_path: &str,
) -> Result<SeasonIntakeOutcome, LibraryError> {
    let folder = expand_tilde(Path::new(folder_path));
    if !folder.is_dir() {
        return Err(LibraryError::FolderNotFound(folder));
    }

    let video_files = find_video_files(&folder).await.map_err(LibraryError::from)?;
    if video_files.is_empty() {
        return Err(LibraryError::NoVideoFiles);
    }

    let parsed = parser.parse(&video_files[0]);
    let metadata = gather(prober, &folder.join(&video_files[0])).await;

    let mut total_bytes = 0u64;
    let mut file_list = Vec::with_capacity(video_files.len());
    for name in &video_files {
        let size = tokio::fs::metadata(folder.join(name)).await?.len();
        total_bytes += size;
        file_list.push(FileSizeEntry {
            name: name.clone(),
            size: format_file_size(size),
        });
    }

    let folder_name = file_name(&folder);
    let target_folder = config.output_dir().join(&folder_name);
    tokio::fs::create_dir_all(&target_folder).await?;

    for name in &video_files {
        let src = folder.join(name);
        let dst = target_folder.join(name);
        if src != dst {
            tokio::fs::copy(&src, &dst).await?;
        }
    }

    let nfo_path = target_folder.join(format!("{}.NFO", folder_name));
    let nfo_content = nfo::render_parsed(
        &config.nfo,
        &parsed,
        &video_files[0],
        MediaKind::SeasonPack,
    );
    tokio::fs::write(&nfo_path, nfo_content).await?;

    Ok(SeasonIntakeOutcome {
        folder_name,
        parsed,
        metadata,
        media_type: MediaKind::SeasonPack,
        target_folder,
        video_files: file_list,
        episode_count: video_files.len(),
        total_size: format_file_size(total_bytes),
        nfo_path,
    })
}

/// Conflict check for a single incoming file against the output directory.
pub async fn check_file_conflict(
    config: &Config,
    filepath: &str,
) -> Result<ConflictResult, LibraryError> {
    let filepath = expand_tilde(Path::new(filepath));
    if !filepath.is_file() {
        return Err(LibraryError::FileNotFound(filepath));
    }

    let base_name = file_stem(&file_name(&filepath));
    let size_bytes = tokio::fs::metadata(&filepath).await?.len();
    let incoming = IncomingDescriptor {
        name: base_name,
        size_bytes,
        file_count: 1,
        video_file_count: None,
    };
    Ok(check_target(&config.output_dir(), incoming).await?)
}

/// Conflict check for an incoming season folder.
pub async fn check_season_conflict(
    config: &Config,
    folder_path: &str,
) -> Result<ConflictResult, LibraryError> {
    let folder = expand_tilde(Path::new(folder_path));
    if !folder.is_dir() {
        return Err(LibraryError::FolderNotFound(folder));
    }

    let video_files = find_video_files(&folder).await.map_err(LibraryError::from)?;
    if video_files.is_empty() {
        return Err(LibraryError::NoVideoFiles);
    }

    let mut total_bytes = 0u64;
    for name in &video_files {
        total_bytes += tokio::fs::metadata(folder.join(name)).await?.len();
    }

    let incoming = IncomingDescriptor {
        name: file_name(&folder),
        size_bytes: total_bytes,
        file_count: video_files.len(),
        video_file_count: Some(video_files.len()),
    };
    Ok(check_target(&config.output_dir(), incoming).await?)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}
