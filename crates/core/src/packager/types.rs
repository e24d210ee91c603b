use serde::Serialize;

/// Summary of one side of a conflict check: an existing release folder, or
/// the incoming item about to take its name.
#[derive(Debug, Clone, Serialize)]
pub struct TargetDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Human-readable aggregate size.
    pub size: String,
    pub file_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_file_count: Option<usize>,
    /// Creation time, `%Y-%m-%d %H:%M`. Existing targets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

/// Outcome of the pre-flight conflict check. Advisory only; the create
/// pipeline re-checks under the target lock before mutating.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictResult {
    pub conflict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing: Option<TargetDescriptor>,
    #[serde(rename = "new", skip_serializing_if = "Option::is_none")]
    pub incoming: Option<TargetDescriptor>,
}

impl ConflictResult {
    pub fn clear() -> Self {
        Self {
            conflict: false,
            existing: None,
            incoming: None,
        }
    }
}

/// One file in a release preview.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedFile {
    pub name: String,
    /// "video" or "nfo".
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// What a create operation would produce. Never touches disk.
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePreview {
    pub base_name: String,
    pub torrent_name: String,
    pub output_dir: String,
    pub files: Vec<PlannedFile>,
    pub nfo_content: String,
    pub warnings: Vec<String>,
}

/// Outcome of a completed create operation.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
    /// Correlates log lines for one packaging run.
    pub job_id: String,
    pub base_name: String,
    pub folder_path: String,
    /// Renamed video file. Single-file releases only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_name: Option<String>,
    /// Per-file names after the batch rename. Season packs only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub renamed_files: Vec<String>,
    pub nfo_path: String,
    pub torrent_path: String,
    pub torrent_filename: String,
    pub info_hash: String,
}
