//! Mock torrent writer for testing.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::torrent::{TorrentError, TorrentRequest, TorrentSummary, TorrentWriter};

/// Mock implementation of the `TorrentWriter` trait.
///
/// Records every request and returns a fixed summary without hashing
/// anything. Can be armed to fail the next write.
#[derive(Debug, Default)]
pub struct MockTorrentWriter {
    calls: Mutex<Vec<TorrentRequest>>,
    fail_next: Mutex<bool>,
}

impl MockTorrentWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `write` call with a create error.
    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    /// Requests written so far, in order.
    pub fn calls(&self) -> Vec<TorrentRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TorrentWriter for MockTorrentWriter {
    async fn write(&self, request: &TorrentRequest) -> Result<TorrentSummary, TorrentError> {
        if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
            return Err(TorrentError::CreateFailed(
                "mock write failure".to_string(),
            ));
        }
        self.calls.lock().unwrap().push(request.clone());
        Ok(TorrentSummary {
            info_hash: "da39a3ee5e6b4b0d3255bfef95601890afd80709".to_string(),
            torrent_path: request.output_path.clone(),
            size_bytes: 256,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request() -> TorrentRequest {
        TorrentRequest {
            content_path: PathBuf::from("/releases/X"),
            output_path: PathBuf::from("/releases/X.torrent"),
            trackers: vec!["http://tracker.example/announce".to_string()],
            comment: None,
            overwrite: true,
        }
    }

    #[tokio::test]
    async fn test_records_calls() {
        let writer = MockTorrentWriter::new();
        let summary = writer.write(&request()).await.unwrap();
        assert_eq!(summary.torrent_path, PathBuf::from("/releases/X.torrent"));
        assert_eq!(writer.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_fail_next_fails_once() {
        let writer = MockTorrentWriter::new();
        writer.fail_next();
        assert!(writer.write(&request()).await.is_err());
        assert!(writer.write(&request()).await.is_ok());
    }
}
