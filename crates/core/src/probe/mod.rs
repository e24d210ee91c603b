//! Media probing and metadata normalization.
//!
//! The `Prober` trait wraps the external probe subprocess; `FfprobeProber`
//! is the shipped implementation. Raw stream facts are turned into display
//! tokens by `normalize`. Probing is best-effort: `gather` degrades to
//! default-empty facts when the probe binary is missing, times out, or
//! exits non-zero, and the pipeline continues.

mod error;
mod ffprobe;
mod normalize;
mod types;

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

pub use error::ProbeError;
pub use ffprobe::FfprobeProber;
pub use normalize::{format_duration, format_file_size, normalize};
pub use types::{AudioStreamFacts, MetadataFacts, RawProbe, VideoStreamFacts};

/// Probes a media file for stream facts.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<RawProbe, ProbeError>;
}

/// Probe and normalize, falling back to default-empty facts on any failure.
///
/// File size comes from the filesystem so it survives a failed probe and
/// is still reported when ffprobe is not installed.
pub async fn gather(prober: &dyn Prober, path: &Path) -> MetadataFacts {
    let size_bytes = tokio::fs::metadata(path).await.map(|m| m.len()).ok();

    let mut facts = match prober.probe(path).await {
        Ok(raw) => normalize(&raw),
        Err(e) => {
            debug!("Probe failed for {}: {}", path.display(), e);
            crate::metrics::PROBE_FAILURES.inc();
            MetadataFacts::default()
        }
    };

    if facts.file_size.is_empty() {
        if let Some(bytes) = size_bytes {
            facts.file_size = format_file_size(bytes);
        }
    }

    facts
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProber;

    #[async_trait]
    impl Prober for FailingProber {
        async fn probe(&self, _path: &Path) -> Result<RawProbe, ProbeError> {
            Err(ProbeError::NotFound {
                path: "ffprobe".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_gather_degrades_to_defaults_with_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.mkv");
        tokio::fs::write(&path, vec![0u8; 2048]).await.unwrap();

        let facts = gather(&FailingProber, &path).await;
        assert_eq!(facts.resolution, "");
        assert_eq!(facts.video_codec, "");
        assert_eq!(facts.file_size, "2.00 KB");
    }

    #[tokio::test]
    async fn test_gather_missing_file_is_all_defaults() {
        let facts = gather(&FailingProber, Path::new("/nonexistent.mkv")).await;
        assert_eq!(facts, MetadataFacts::default());
    }
}
