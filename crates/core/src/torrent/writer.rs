//! librqbit-backed torrent writer.

use async_trait::async_trait;
use librqbit::{create_torrent, CreateTorrentOptions};
use librqbit_bencode::bencode_serialize_to_writer;
use librqbit_buffers::ByteBufOwned;
use tracing::info;

use super::{TorrentError, TorrentRequest, TorrentSummary, TorrentWriter};

/// Writes .torrent files by hashing the content with librqbit.
///
/// librqbit's creation options carry neither trackers nor a comment, so
/// the metainfo it returns is re-serialized here with the announce fields
/// and comment filled in. The info dict is untouched, so the info hash
/// librqbit computed stays valid.
#[derive(Debug, Default)]
pub struct LibrqbitWriter;

fn byte_buf(s: &str) -> ByteBufOwned {
    s.as_bytes().into()
}

impl LibrqbitWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TorrentWriter for LibrqbitWriter {
    async fn write(&self, request: &TorrentRequest) -> Result<TorrentSummary, TorrentError> {
        if !request.content_path.exists() {
            return Err(TorrentError::ContentNotFound(request.content_path.clone()));
        }
        if request.output_path.exists() && !request.overwrite {
            return Err(TorrentError::AlreadyExists(request.output_path.clone()));
        }

        let name = request
            .content_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());

        let mut options = CreateTorrentOptions::default();
        options.name = name.as_deref();

        let result = create_torrent(&request.content_path, options)
            .await
            .map_err(|e| TorrentError::CreateFailed(e.to_string()))?;

        let mut meta = result.as_info().clone();
        meta.announce = request.trackers.first().map(|t| byte_buf(t));
        if request.trackers.len() > 1 {
            // One tier per tracker, matching the flat-list convention.
            meta.announce_list = request
                .trackers
                .iter()
                .map(|t| vec![byte_buf(t)])
                .collect();
        }
        meta.comment = request.comment.as_deref().map(byte_buf);

        let info_hash = meta.info_hash.as_string();
        let mut bytes = Vec::new();
        bencode_serialize_to_writer(&meta, &mut bytes)
            .map_err(|e| TorrentError::CreateFailed(e.to_string()))?;

        if let Some(parent) = request.output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&request.output_path, &bytes).await?;

        info!(
            path = %request.output_path.display(),
            info_hash = %info_hash,
            trackers = request.trackers.len(),
            "wrote torrent"
        );

        Ok(TorrentSummary {
            info_hash,
            torrent_path: request.output_path.clone(),
            size_bytes: bytes.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_missing_content_is_rejected() {
        let writer = LibrqbitWriter::new();
        let request = TorrentRequest {
            content_path: PathBuf::from("/nonexistent/release"),
            output_path: PathBuf::from("/tmp/out.torrent"),
            trackers: vec![],
            comment: None,
            overwrite: false,
        };
        let result = writer.write(&request).await;
        assert!(matches!(result, Err(TorrentError::ContentNotFound(_))));
    }

    #[tokio::test]
    async fn test_existing_output_without_overwrite_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("Release.Name");
        std::fs::create_dir(&content).unwrap();
        std::fs::write(content.join("file.mkv"), b"data").unwrap();
        let output = dir.path().join("Release.Name.torrent");
        std::fs::write(&output, b"stale").unwrap();

        let writer = LibrqbitWriter::new();
        let request = TorrentRequest {
            content_path: content,
            output_path: output,
            trackers: vec![],
            comment: None,
            overwrite: false,
        };
        let result = writer.write(&request).await;
        assert!(matches!(result, Err(TorrentError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_write_produces_parseable_torrent() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("Show.S01E01.1080p");
        std::fs::create_dir(&content).unwrap();
        std::fs::write(content.join("Show.S01E01.1080p.mkv"), vec![0u8; 4096]).unwrap();
        let output = dir.path().join("Show.S01E01.1080p.torrent");

        let writer = LibrqbitWriter::new();
        let request = TorrentRequest {
            content_path: content,
            output_path: output.clone(),
            trackers: vec!["http://tracker.example/announce".to_string()],
            comment: None,
            overwrite: false,
        };
        let summary = writer.write(&request).await.unwrap();
        assert_eq!(summary.info_hash.len(), 40);
        assert!(output.exists());

        let bytes = std::fs::read(&output).unwrap();
        let details = crate::torrent::inspect_torrent(&bytes).unwrap();
        assert_eq!(details.name, "Show.S01E01.1080p");
        assert_eq!(details.info_hash, summary.info_hash);
        assert_eq!(
            details.announce.as_deref(),
            Some("http://tracker.example/announce")
        );
    }

    #[tokio::test]
    async fn test_write_embeds_all_trackers_and_comment() {
        use librqbit_core::torrent_metainfo::{torrent_from_bytes, TorrentMetaV1Owned};

        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("Release.Name");
        std::fs::create_dir(&content).unwrap();
        std::fs::write(content.join("file.mkv"), vec![0u8; 2048]).unwrap();
        let output = dir.path().join("Release.Name.torrent");

        let writer = LibrqbitWriter::new();
        let request = TorrentRequest {
            content_path: content,
            output_path: output.clone(),
            trackers: vec![
                "udp://a.example:1337/announce".to_string(),
                "udp://b.example:1337/announce".to_string(),
            ],
            comment: Some("packaged release".to_string()),
            overwrite: false,
        };
        writer.write(&request).await.unwrap();

        let bytes = std::fs::read(&output).unwrap();
        let meta: TorrentMetaV1Owned = torrent_from_bytes(&bytes).unwrap();
        assert_eq!(
            meta.announce.as_ref().map(|b| b.as_ref()),
            Some("udp://a.example:1337/announce".as_bytes())
        );
        let tiers: Vec<&[u8]> = meta
            .announce_list
            .iter()
            .flatten()
            .map(|b| b.as_ref())
            .collect();
        assert_eq!(
            tiers,
            vec![
                "udp://a.example:1337/announce".as_bytes(),
                "udp://b.example:1337/announce".as_bytes(),
            ]
        );
        assert_eq!(
            meta.comment.as_ref().map(|b| b.as_ref()),
            Some("packaged release".as_bytes())
        );
    }

    #[tokio::test]
    async fn test_write_without_trackers_omits_announce() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("Release.Name");
        std::fs::create_dir(&content).unwrap();
        std::fs::write(content.join("file.mkv"), b"data").unwrap();
        let output = dir.path().join("Release.Name.torrent");

        let writer = LibrqbitWriter::new();
        let request = TorrentRequest {
            content_path: content,
            output_path: output.clone(),
            trackers: vec![],
            comment: None,
            overwrite: false,
        };
        writer.write(&request).await.unwrap();

        let bytes = std::fs::read(&output).unwrap();
        let details = crate::torrent::inspect_torrent(&bytes).unwrap();
        assert_eq!(details.announce, None);
    }
}
