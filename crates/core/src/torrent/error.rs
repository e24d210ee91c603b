use std::path::PathBuf;

use thiserror::Error;

/// Errors from creating or inspecting .torrent files.
#[derive(Debug, Error)]
pub enum TorrentError {
    #[error("Content path not found: {0}")]
    ContentNotFound(PathBuf),

    #[error("Torrent already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Failed to create torrent: {0}")]
    CreateFailed(String),

    #[error("Failed to parse torrent: {0}")]
    ParseError(String),

    #[error("Empty torrent (no files)")]
    EmptyTorrent,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
