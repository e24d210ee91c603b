//! Mock prober for testing.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::probe::{ProbeError, Prober, RawProbe};

/// Mock implementation of the `Prober` trait.
///
/// Returns one configured probe result for every path, or a fixed failure.
#[derive(Debug, Default)]
pub struct MockProber {
    result: Mutex<Option<RawProbe>>,
    probed: Mutex<Vec<String>>,
}

impl MockProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// A prober whose every probe fails, for degraded-mode tests.
    pub fn failing() -> Self {
        Self::default()
    }

    /// A prober that returns `raw` for every path.
    pub fn with_result(raw: RawProbe) -> Self {
        Self {
            result: Mutex::new(Some(raw)),
            probed: Mutex::new(Vec::new()),
        }
    }

    /// Paths probed so far.
    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prober for MockProber {
    async fn probe(&self, path: &Path) -> Result<RawProbe, ProbeError> {
        self.probed
            .lock()
            .unwrap()
            .push(path.to_string_lossy().into_owned());
        match self.result.lock().unwrap().clone() {
            Some(raw) => Ok(raw),
            None => Err(ProbeError::Failed {
                stderr: "mock probe failure".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::VideoStreamFacts;

    #[tokio::test]
    async fn test_configured_result_is_returned() {
        let raw = RawProbe {
            video: Some(VideoStreamFacts {
                codec_name: "hevc".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let prober = MockProber::with_result(raw);

        let result = prober.probe(Path::new("/x.mkv")).await.unwrap();
        assert_eq!(result.video.unwrap().codec_name, "hevc");
        assert_eq!(prober.probed(), vec!["/x.mkv"]);
    }

    #[tokio::test]
    async fn test_failing_prober_errors() {
        let prober = MockProber::failing();
        assert!(prober.probe(Path::new("/x.mkv")).await.is_err());
    }
}
