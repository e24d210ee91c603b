use std::path::PathBuf;

use thiserror::Error;

use crate::packager::PackagerError;

/// Errors from library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("No video files found in the selected folder.")]
    NoVideoFiles,

    #[error("Failed to delete torrent: {0}")]
    DeleteFailed(String),

    #[error(transparent)]
    Packager(#[from] PackagerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub fn is_client_error(&self) -> bool {
        match self {
            LibraryError::FileNotFound(_)
            | LibraryError::FolderNotFound(_)
            | LibraryError::NoVideoFiles => true,
            LibraryError::Packager(e) => e.is_client_error(),
            _ => false,
        }
    }
}
