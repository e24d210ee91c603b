use std::path::PathBuf;

use thiserror::Error;

use crate::torrent::TorrentError;

/// Errors from the packaging pipeline.
///
/// Bad input maps to a client error, `Conflict` and `BatchCollision` to a
/// conflict response, everything else is a server-side failure.
#[derive(Debug, Error)]
pub enum PackagerError {
    #[error("Folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("No video file found in the folder")]
    NoVideoFiles,

    #[error("Naming template produced an empty name. Check your template and fields.")]
    EmptyName,

    #[error("'{name}' already exists")]
    Conflict { name: String },

    #[error("Batch rename collision: {0}")]
    BatchCollision(String),

    #[error(transparent)]
    Torrent(#[from] TorrentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackagerError {
    /// True for errors caused by the request rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PackagerError::FolderNotFound(_)
                | PackagerError::NoVideoFiles
                | PackagerError::EmptyName
        )
    }

    /// True for target collisions that reject the operation without mutation.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            PackagerError::Conflict { .. } | PackagerError::BatchCollision(_)
        )
    }
}
