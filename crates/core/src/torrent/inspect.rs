//! Bencoded .torrent inspection via librqbit-core.

use librqbit_core::torrent_metainfo::{torrent_from_bytes, TorrentMetaV1Owned};
use serde::Serialize;

use super::TorrentError;

/// One file inside a torrent.
#[derive(Debug, Clone, Serialize)]
pub struct TorrentFileEntry {
    /// Path relative to the torrent root, joined with `/`.
    pub path: String,
    pub size_bytes: u64,
}

/// Parsed view of a .torrent file.
#[derive(Debug, Clone, Serialize)]
pub struct TorrentDetails {
    pub name: String,
    /// Lowercase hex info hash.
    pub info_hash: String,
    /// Primary announce URL, when the torrent carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announce: Option<String>,
    pub total_size_bytes: u64,
    pub files: Vec<TorrentFileEntry>,
}

/// Parse a .torrent file into its name, info hash and file listing.
///
/// Supports both single-file and multi-file torrents.
pub fn inspect_torrent(bytes: &[u8]) -> Result<TorrentDetails, TorrentError> {
    let torrent: TorrentMetaV1Owned =
        torrent_from_bytes(bytes).map_err(|e| TorrentError::ParseError(e.to_string()))?;

    let info = &torrent.info;
    let name = info
        .name
        .as_ref()
        .map(|b| bytes_to_string(b.as_ref()))
        .unwrap_or_else(|| "unknown".to_string());

    let files = if let Some(ref entries) = info.files {
        let mut result = Vec::with_capacity(entries.len());
        for entry in entries {
            let path = entry
                .path
                .iter()
                .map(|part| bytes_to_string(part.as_ref()))
                .collect::<Vec<_>>()
                .join("/");
            result.push(TorrentFileEntry {
                path,
                size_bytes: entry.length,
            });
        }
        if result.is_empty() {
            return Err(TorrentError::EmptyTorrent);
        }
        result
    } else if let Some(length) = info.length {
        vec![TorrentFileEntry {
            path: name.clone(),
            size_bytes: length,
        }]
    } else {
        return Err(TorrentError::EmptyTorrent);
    };

    let total_size_bytes = files.iter().map(|f| f.size_bytes).sum();
    let announce = torrent.announce.as_ref().map(|a| bytes_to_string(a.as_ref()));

    Ok(TorrentDetails {
        name,
        info_hash: torrent.info_hash.as_string(),
        announce,
        total_size_bytes,
        files,
    })
}

fn bytes_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
