//! ffprobe-based prober implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use super::error::ProbeError;
use super::types::{AudioStreamFacts, RawProbe, VideoStreamFacts};
use super::Prober;
use crate::config::ProbeConfig;

/// Spawns ffprobe with a bounded timeout and parses its JSON output.
pub struct FfprobeProber {
    config: ProbeConfig,
}

impl FfprobeProber {
    /// Creates a new prober with the given configuration.
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Creates a prober with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ProbeConfig::default())
    }

    /// Parses ffprobe JSON output into raw stream facts.
    fn parse_probe_output(output: &str) -> Result<RawProbe, ProbeError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            #[serde(default)]
            format: Option<ProbeFormat>,
            #[serde(default)]
            streams: Vec<ProbeStream>,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            duration: Option<String>,
            size: Option<String>,
        }

        #[derive(Deserialize)]
        struct ProbeStream {
            codec_type: String,
            codec_name: Option<String>,
            width: Option<u32>,
            height: Option<u32>,
            coded_width: Option<u32>,
            coded_height: Option<u32>,
            pix_fmt: Option<String>,
            color_transfer: Option<String>,
            color_space: Option<String>,
            channels: Option<u8>,
        }

        let probe: ProbeOutput = serde_json::from_str(output)
            .map_err(|e| ProbeError::ParseError(e.to_string()))?;

        // First stream of each type wins.
        let video_stream = probe.streams.iter().find(|s| s.codec_type == "video");
        let audio_stream = probe.streams.iter().find(|s| s.codec_type == "audio");

        Ok(RawProbe {
            video: video_stream.map(|s| VideoStreamFacts {
                codec_name: s.codec_name.clone().unwrap_or_default(),
                width: s.width,
                height: s.height,
                coded_width: s.coded_width,
                coded_height: s.coded_height,
                pix_fmt: s.pix_fmt.clone().unwrap_or_default(),
                color_transfer: s.color_transfer.clone().unwrap_or_default(),
                color_space: s.color_space.clone().unwrap_or_default(),
            }),
            audio: audio_stream.map(|s| AudioStreamFacts {
                codec_name: s.codec_name.clone().unwrap_or_default(),
                channels: s.channels,
            }),
            duration_secs: probe
                .format
                .as_ref()
                .and_then(|f| f.duration.as_ref())
                .and_then(|d| d.parse::<f64>().ok()),
            size_bytes: probe
                .format
                .as_ref()
                .and_then(|f| f.size.as_ref())
                .and_then(|s| s.parse::<u64>().ok()),
        })
    }
}

#[async_trait]
impl Prober for FfprobeProber {
    async fn probe(&self, path: &Path) -> Result<RawProbe, ProbeError> {
        if !path.exists() {
            return Err(ProbeError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let run = Command::new(&self.config.ffprobe_path)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output();

        let output = timeout(Duration::from_secs(self.config.timeout_secs), run)
            .await
            .map_err(|_| ProbeError::Timeout {
                timeout_secs: self.config.timeout_secs,
            })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProbeError::NotFound {
                        path: self.config.ffprobe_path.clone(),
                    }
                } else {
                    ProbeError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_probe_output(&stdout)
    }
}
