//! Pre-flight conflict detection.
//!
//! Checks whether the output directory already holds a folder with the
//! incoming item's name and describes both sides so the caller can decide.
//! Always runs against the live filesystem; results are never cached.

use std::path::Path;

use chrono::{DateTime, Local};

use super::scan::is_video_file;
use super::types::{ConflictResult, TargetDescriptor};
use super::PackagerError;
use crate::metrics;
use crate::probe::format_file_size;

/// The incoming side of a conflict check.
#[derive(Debug, Clone)]
pub struct IncomingDescriptor {
    pub name: String,
    pub size_bytes: u64,
    pub file_count: usize,
    /// Set for season packs, absent for single files.
    pub video_file_count: Option<usize>,
}

/// Check the prospective target name against the output directory.
pub async fn check_target(
    output_dir: &Path,
    incoming: IncomingDescriptor,
) -> Result<ConflictResult, PackagerError> {
    let target = output_dir.join(&incoming.name);
    if !target.exists() {
        return Ok(ConflictResult::clear());
    }

    let mut file_count = 0usize;
    let mut video_file_count = 0usize;
    let mut total_bytes = 0u64;
    let mut entries = tokio::fs::read_dir(&target).await?;
    while let Some(entry) = entries.next_entry().await? {
        file_count += 1;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_video_file(&name) {
            video_file_count += 1;
        }
        if let Ok(meta) = entry.metadata().await {
            if meta.is_file() {
                total_bytes += meta.len();
            }
        }
    }

    let created = folder_created(&target).await;
    metrics::CONFLICTS_DETECTED
        .with_label_values(&["target"])
        .inc();

    Ok(ConflictResult {
        conflict: true,
        existing: Some(TargetDescriptor {
            name: incoming.name.clone(),
            path: Some(target.to_string_lossy().into_owned()),
            size: format_file_size(total_bytes),
            file_count,
            video_file_count: Some(video_file_count),
            created,
        }),
        incoming: Some(TargetDescriptor {
            name: incoming.name,
            path: None,
            size: format_file_size(incoming.size_bytes),
            file_count: incoming.file_count,
            video_file_count: incoming.video_file_count,
            created: None,
        }),
    })
}

/// Folder creation time formatted for display. Falls back to the modified
/// time on filesystems that do not record a birth time.
async fn folder_created(path: &Path) -> Option<String> {
    let meta = tokio::fs::metadata(path).await.ok()?;
    let stamp = meta.created().or_else(|_| meta.modified()).ok()?;
    let local: DateTime<Local> = stamp.into();
    Some(local.format("%Y-%m-%d %H:%M").to_string())
}
