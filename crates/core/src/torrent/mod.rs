//! Torrent file creation and inspection.
//!
//! Writing is behind the [`TorrentWriter`] trait so the packaging pipeline
//! can be tested without hashing real payloads. Inspection parses bencoded
//! .torrent data with librqbit-core.

mod error;
mod inspect;
mod writer;

use std::path::PathBuf;

use async_trait::async_trait;

pub use error::TorrentError;
pub use inspect::{inspect_torrent, TorrentDetails, TorrentFileEntry};
pub use writer::LibrqbitWriter;

/// Everything needed to produce one .torrent file.
#[derive(Debug, Clone)]
pub struct TorrentRequest {
    /// Release folder to hash.
    pub content_path: PathBuf,
    /// Destination .torrent path.
    pub output_path: PathBuf,
    pub trackers: Vec<String>,
    pub comment: Option<String>,
    /// Replace an existing .torrent at the destination.
    pub overwrite: bool,
}

/// Result of a completed write.
#[derive(Debug, Clone)]
pub struct TorrentSummary {
    /// Lowercase hex info hash.
    pub info_hash: String,
    pub torrent_path: PathBuf,
    /// Size of the .torrent file itself.
    pub size_bytes: u64,
}

/// Produces .torrent files for finished release folders.
#[async_trait]
pub trait TorrentWriter: Send + Sync {
    async fn write(&self, request: &TorrentRequest) -> Result<TorrentSummary, TorrentError>;
}
