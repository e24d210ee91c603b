//! Preview and create flows for movie, episode and season releases.
//!
//! Previews render names and NFO content without touching disk. Creates run
//! the full pipeline under the target-name lock: (season: batch rename) →
//! rename video → replace NFO → rename folder → write the .torrent beside
//! the renamed folder.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use super::batch::{apply_batch, plan_batch, BatchPlan};
use super::locks::TargetLocks;
use super::scan::{find_first_video, find_video_files};
use super::types::{PlannedFile, ReleasePreview, ReleaseReport};
use super::PackagerError;
use crate::classifier::MediaKind;
use crate::config::{expand_tilde, Config};
use crate::metrics;
use crate::naming::{render, ReleaseFields};
use crate::nfo::{self, NfoFileEntry};
use crate::parser::NameParser;
use crate::probe::format_file_size;
use crate::torrent::{TorrentRequest, TorrentWriter};

/// Drives the packaging pipeline.
///
/// Configuration is passed into every call rather than held here, so a
/// config edit between requests takes effect immediately.
pub struct Packager {
    parser: Arc<dyn NameParser>,
    writer: Arc<dyn TorrentWriter>,
    locks: TargetLocks,
}

impl Packager {
    pub fn new(parser: Arc<dyn NameParser>, writer: Arc<dyn TorrentWriter>) -> Self {
        Self {
            parser,
            writer,
            locks: TargetLocks::new(),
        }
    }

    pub async fn preview_movie(
        &self,
        config: &Config,
        folder_path: &str,
        fields: &ReleaseFields,
    ) -> Result<ReleasePreview, PackagerError> {
        self.preview_single(config, folder_path, fields, MediaKind::Movie)
            .await
    }

    pub async fn preview_episode(
        &self,
        config: &Config,
        folder_path: &str,
        fields: &ReleaseFields,
    ) -> Result<ReleasePreview, PackagerError> {
        self.preview_single(config, folder_path, fields, MediaKind::Episode)
            .await
    }

    pub async fn create_movie(
        &self,
        config: &Config,
        folder_path: &str,
        fields: &ReleaseFields,
    ) -> Result<ReleaseReport, PackagerError> {
        let result = self
            .create_single(config, folder_path, fields, MediaKind::Movie)
            .await;
        record_outcome(MediaKind::Movie, &result);
        result
    }

    pub async fn create_episode(
        &self,
        config: &Config,
        folder_path: &str,
        fields: &ReleaseFields,
    ) -> Result<ReleaseReport, PackagerError> {
        let result = self
            .create_single(config, folder_path, fields, MediaKind::Episode)
            .await;
        record_outcome(MediaKind::Episode, &result);
        result
    }

    /// Preview a single-file release: names, NFO and warnings, no mutation.
    async fn preview_single(
        &self,
        config: &Config,
        folder_path: &str,
        fields: &ReleaseFields,
        kind: MediaKind,
    ) -> Result<ReleasePreview, PackagerError> {
        let folder = resolve_folder(folder_path)?;
        let (_, ext) = find_first_video(&folder)
            .await?
            .ok_or(PackagerError::NoVideoFiles)?;

        let base_name = self.base_name(config, kind, fields)?;
        let video_name = format!("{}{}", base_name, ext);
        let nfo_name = format!("{}.NFO", base_name);

        let nfo_content = match kind {
            MediaKind::Episode => nfo::render_episode(&config.nfo, fields, &video_name),
            _ => nfo::render_movie(&config.nfo, fields, &video_name),
        };

        Ok(ReleasePreview {
            torrent_name: format!("{}.torrent", base_name),
            output_dir: config.output_directory.to_string_lossy().into_owned(),
            files: vec![
                PlannedFile {
                    name: video_name,
                    kind: "video",
                },
                PlannedFile {
                    name: nfo_name,
                    kind: "nfo",
                },
            ],
            nfo_content,
            warnings: tracker_warnings(config),
            base_name,
        })
    }

    /// Create a single-file release under the target-name lock.
    async fn create_single(
        &self,
        config: &Config,
        folder_path: &str,
        fields: &ReleaseFields,
        kind: MediaKind,
    ) -> Result<ReleaseReport, PackagerError> {
        let folder = resolve_folder(folder_path)?;
        let (video_file, ext) = find_first_video(&folder)
            .await?
            .ok_or(PackagerError::NoVideoFiles)?;

        let base_name = self.base_name(config, kind, fields)?;
        let job_id = Uuid::new_v4().to_string();
        let _guard = self.locks.acquire(&base_name).await;

        info!(job_id = %job_id, kind = kind.as_str(), base_name = %base_name, "packaging release");

        let video_name = format!("{}{}", base_name, ext);
        rename_within(&folder, &video_file, &video_name).await?;

        let nfo_content = match kind {
            MediaKind::Episode => nfo::render_episode(&config.nfo, fields, &video_name),
            _ => nfo::render_movie(&config.nfo, fields, &video_name),
        };
        let nfo_path = replace_nfo(&folder, &base_name, &nfo_content).await?;

        let new_folder = rename_folder(&folder, &base_name).await?;
        let nfo_path = new_folder.join(nfo_path.file_name().unwrap_or_default());

        let summary = self.write_torrent(config, kind, &new_folder, &base_name).await?;

        Ok(ReleaseReport {
            job_id,
            base_name,
            folder_path: new_folder.to_string_lossy().into_owned(),
            video_name: Some(video_name),
            renamed_files: Vec::new(),
            nfo_path: nfo_path.to_string_lossy().into_owned(),
            torrent_path: summary.torrent_path.to_string_lossy().into_owned(),
            torrent_filename: summary
                .torrent_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
            info_hash: summary.info_hash,
        })
    }

    /// Preview a season pack: folder name, per-file renames, NFO listing.
    pub async fn preview_season(
        &self,
        config: &Config,
        folder_path: &str,
        fields: &ReleaseFields,
    ) -> Result<ReleasePreview, PackagerError> {
        let folder = resolve_folder(folder_path)?;
        let files = find_video_files(&folder).await?;
        if files.is_empty() {
            return Err(PackagerError::NoVideoFiles);
        }

        let base_name = self.base_name(config, MediaKind::SeasonPack, fields)?;
        let plan = plan_batch(self.parser.as_ref(), fields, &folder, &files).await?;

        let nfo_entries = season_nfo_entries(&folder, &files, &plan).await?;
        let nfo_content = nfo::render_season(&config.nfo, fields, &base_name, &nfo_entries);

        let mut planned: Vec<PlannedFile> = plan
            .target_names()
            .into_iter()
            .map(|name| PlannedFile { name, kind: "video" })
            .collect();
        planned.push(PlannedFile {
            name: format!("{}.NFO", base_name),
            kind: "nfo",
        });

        Ok(ReleasePreview {
            torrent_name: format!("{}.torrent", base_name),
            output_dir: config.output_directory.to_string_lossy().into_owned(),
            files: planned,
            nfo_content,
            warnings: tracker_warnings(config),
            base_name,
        })
    }

    /// Create a season pack: two-phase batch rename, then the shared tail.
    pub async fn create_season(
        &self,
        config: &Config,
        folder_path: &str,
        fields: &ReleaseFields,
    ) -> Result<ReleaseReport, PackagerError> {
        let result = self.create_season_inner(config, folder_path, fields).await;
        record_outcome(MediaKind::SeasonPack, &result);
        result
    }

    async fn create_season_inner(
        &self,
        config: &Config,
        folder_path: &str,
        fields: &ReleaseFields,
    ) -> Result<ReleaseReport, PackagerError> {
        let folder = resolve_folder(folder_path)?;
        let files = find_video_files(&folder).await?;
        if files.is_empty() {
            return Err(PackagerError::NoVideoFiles);
        }

        let base_name = self.base_name(config, MediaKind::SeasonPack, fields)?;
        let job_id = Uuid::new_v4().to_string();
        let _guard = self.locks.acquire(&base_name).await;

        info!(
            job_id = %job_id,
            base_name = %base_name,
            files = files.len(),
            "packaging season pack"
        );

        // Validate the whole rename set before moving anything.
        let plan = plan_batch(self.parser.as_ref(), fields, &folder, &files).await?;
        apply_batch(&folder, &plan).await?;
        let renamed = plan.target_names();

        let nfo_entries = current_nfo_entries(&folder, &renamed).await?;
        let nfo_content = nfo::render_season(&config.nfo, fields, &base_name, &nfo_entries);
        replace_nfo(&folder, &base_name, &nfo_content).await?;

        let new_folder = rename_folder(&folder, &base_name).await?;
        let summary = self
            .write_torrent(config, MediaKind::SeasonPack, &new_folder, &base_name)
            .await?;

        Ok(ReleaseReport {
            job_id,
            base_name: base_name.clone(),
            folder_path: new_folder.to_string_lossy().into_owned(),
            video_name: None,
            renamed_files: renamed,
            nfo_path: new_folder
                .join(format!("{}.NFO", base_name))
                .to_string_lossy()
                .into_owned(),
            torrent_path: summary.torrent_path.to_string_lossy().into_owned(),
            torrent_filename: summary
                .torrent_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
            info_hash: summary.info_hash,
        })
    }

    fn base_name(
        &self,
        config: &Config,
        kind: MediaKind,
        fields: &ReleaseFields,
    ) -> Result<String, PackagerError> {
        let template = match kind {
            MediaKind::Episode => &config.naming.episode,
            MediaKind::SeasonPack => &config.naming.season,
            _ => &config.naming.movie,
        };
        let base_name = render(template, kind, fields);
        if base_name.is_empty() {
            return Err(PackagerError::EmptyName);
        }
        Ok(base_name)
    }

    /// Write the .torrent beside the renamed folder, with timing.
    async fn write_torrent(
        &self,
        config: &Config,
        kind: MediaKind,
        folder: &Path,
        base_name: &str,
    ) -> Result<crate::torrent::TorrentSummary, PackagerError> {
        let parent = folder.parent().unwrap_or_else(|| Path::new("."));
        let request = TorrentRequest {
            content_path: folder.to_path_buf(),
            output_path: parent.join(format!("{}.torrent", base_name)),
            trackers: config.trackers.clone(),
            comment: None,
            overwrite: true,
        };
        if config.trackers.is_empty() {
            warn!(base_name = %base_name, "no trackers configured, torrent has no announce URLs");
        }

        let start = Instant::now();
        let summary = self.writer.write(&request).await?;
        metrics::TORRENT_WRITE_DURATION
            .with_label_values(&[kind.as_str()])
            .observe(start.elapsed().as_secs_f64());
        Ok(summary)
    }
}

fn record_outcome(kind: MediaKind, result: &Result<ReleaseReport, PackagerError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) if e.is_conflict() => "conflict",
        Err(_) => "error",
    };
    metrics::PACKAGING_OPS
        .with_label_values(&[kind.as_str(), outcome])
        .inc();
}

fn resolve_folder(folder_path: &str) -> Result<PathBuf, PackagerError> {
    let folder = expand_tilde(Path::new(folder_path));
    if !folder.is_dir() {
        return Err(PackagerError::FolderNotFound(folder));
    }
    Ok(folder)
}

fn tracker_warnings(config: &Config) -> Vec<String> {
    if config.trackers.is_empty() {
        vec![
            "No trackers configured. The torrent will be created without any announce URLs."
                .to_string(),
        ]
    } else {
        Vec::new()
    }
}

/// Rename a file within its folder, rejecting an existing target.
async fn rename_within(folder: &Path, from: &str, to: &str) -> Result<(), PackagerError> {
    if from == to {
        return Ok(());
    }
    let target = folder.join(to);
    if target.exists() {
        return Err(PackagerError::Conflict {
            name: to.to_string(),
        });
    }
    tokio::fs::rename(folder.join(from), target).await?;
    Ok(())
}

/// Delete any stale .NFO files and write the fresh one.
async fn replace_nfo(
    folder: &Path,
    base_name: &str,
    content: &str,
) -> Result<PathBuf, PackagerError> {
    let mut entries = tokio::fs::read_dir(folder).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.to_uppercase().ends_with(".NFO") {
            tokio::fs::remove_file(entry.path()).await?;
        }
    }
    let nfo_path = folder.join(format!("{}.NFO", base_name));
    tokio::fs::write(&nfo_path, content).await?;
    Ok(nfo_path)
}

/// Rename the release folder to the canonical base name, rejecting an
/// existing sibling of that name.
async fn rename_folder(folder: &Path, base_name: &str) -> Result<PathBuf, PackagerError> {
    let parent = folder.parent().unwrap_or_else(|| Path::new("."));
    let target = parent.join(base_name);
    if folder == target {
        return Ok(target);
    }
    if target.exists() {
        return Err(PackagerError::Conflict {
            name: base_name.to_string(),
        });
    }
    tokio::fs::rename(folder, &target).await?;
    Ok(target)
}

/// NFO file entries for a preview: planned names paired with the current
/// files' sizes.
async fn season_nfo_entries(
    folder: &Path,
    files: &[String],
    plan: &BatchPlan,
) -> Result<Vec<NfoFileEntry>, PackagerError> {
    let mut entries = Vec::with_capacity(files.len());
    for (file, rename) in files.iter().zip(&plan.renames) {
        let size = tokio::fs::metadata(folder.join(file)).await?.len();
        entries.push(NfoFileEntry {
            name: rename.to.clone(),
            size: format_file_size(size),
        });
    }
    Ok(entries)
}

/// NFO file entries after the batch rename has been applied.
async fn current_nfo_entries(
    folder: &Path,
    files: &[String],
) -> Result<Vec<NfoFileEntry>, PackagerError> {
    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let size = tokio::fs::metadata(folder.join(file)).await?.len();
        entries.push(NfoFileEntry {
            name: file.clone(),
            size: format_file_size(size),
        });
    }
    Ok(entries)
}
