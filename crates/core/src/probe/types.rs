use serde::{Deserialize, Serialize};

/// Raw stream facts from the probe subprocess, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProbe {
    pub video: Option<VideoStreamFacts>,
    pub audio: Option<AudioStreamFacts>,
    pub duration_secs: Option<f64>,
    pub size_bytes: Option<u64>,
}

/// First video stream of a probed file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoStreamFacts {
    pub codec_name: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Pre-crop dimensions; preferred over display dimensions because
    /// letterboxed content reports a reduced display height.
    pub coded_width: Option<u32>,
    pub coded_height: Option<u32>,
    pub pix_fmt: String,
    pub color_transfer: String,
    pub color_space: String,
}

/// First audio stream of a probed file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioStreamFacts {
    pub codec_name: String,
    pub channels: Option<u8>,
}

/// Canonical display tokens derived from a probe.
///
/// Every field defaults to empty; a failed probe leaves them that way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFacts {
    /// Resolution tier, e.g. "1080p".
    pub resolution: String,
    /// Encoder-style display tag, e.g. "x265".
    pub video_codec: String,
    pub audio_codec: String,
    /// Human-readable size, e.g. "4.37 GB".
    pub file_size: String,
    /// "HH:MM:SS" or empty.
    pub duration: String,
    /// "8-bit" / "10-bit" / "12-bit".
    pub bit_depth: String,
    /// "HDR10", "HLG", "HDR", or empty.
    pub hdr_format: String,
    /// "5.1", "2.0", etc.
    pub audio_channels: String,
}
