//! Raw probe facts to canonical display tokens.

use super::types::{MetadataFacts, RawProbe};

/// Standard resolution tiers, highest first.
const RESOLUTION_TIERS: [u32; 6] = [2160, 1440, 1080, 720, 576, 480];

/// Normalize raw probe facts into display tokens.
pub fn normalize(raw: &RawProbe) -> MetadataFacts {
    let mut facts = MetadataFacts::default();

    if let Some(ref video) = raw.video {
        // Prefer coded (pre-crop) dimensions: letterboxed 1080p content
        // stores a reduced display height but keeps its full coded frame.
        // Some decoders report coded dimensions as 0; fall back to the
        // display dimensions then.
        let width = video.coded_width.filter(|&w| w > 0).or(video.width);
        let height = video.coded_height.filter(|&h| h > 0).or(video.height);
        if let (Some(width), Some(height)) = (width, height) {
            facts.resolution = bucket_resolution(width, height);
        }

        facts.video_codec = display_video_codec(&video.codec_name);
        facts.bit_depth = bit_depth(&video.pix_fmt).to_string();
        facts.hdr_format = hdr_tag(&video.color_transfer, &video.color_space, &facts.bit_depth);
    }

    if let Some(ref audio) = raw.audio {
        facts.audio_codec = display_audio_codec(&audio.codec_name);
        if let Some(channels) = audio.channels {
            facts.audio_channels = channel_layout(channels);
        }
    }

    if let Some(duration) = raw.duration_secs {
        facts.duration = format_duration(duration);
    }

    if let Some(bytes) = raw.size_bytes {
        facts.file_size = format_file_size(bytes);
    }

    facts
}

/// Bucket pixel dimensions into the nearest-or-equal standard tier.
///
/// The effective height is the larger of the raw height and a width-derived
/// 16:9 equivalent, so cropped content classifies by its encode tier rather
/// than the visible rectangle.
pub fn bucket_resolution(width: u32, height: u32) -> String {
    let by_width = ((width as f64) * 9.0 / 16.0).round() as u32;
    let effective = height.max(by_width);

    for tier in RESOLUTION_TIERS {
        if effective >= tier {
            return format!("{}p", tier);
        }
    }
    format!("{}p", effective)
}

/// Map probe codec identifiers to the display tags releases use.
///
/// The two dominant codecs go by their encoder names: h264 releases are
/// tagged x264, hevc releases x265.
fn display_video_codec(codec_name: &str) -> String {
    if codec_name.is_empty() {
        return String::new();
    }
    match codec_name {
        "h264" => "x264".to_string(),
        "hevc" => "x265".to_string(),
        "av1" => "AV1".to_string(),
        "vp9" => "VP9".to_string(),
        other => other.to_uppercase(),
    }
}

fn display_audio_codec(codec_name: &str) -> String {
    if codec_name.is_empty() {
        return String::new();
    }
    match codec_name {
        "aac" => "AAC".to_string(),
        "ac3" => "AC3".to_string(),
        "eac3" => "EAC3".to_string(),
        "dts" => "DTS".to_string(),
        "truehd" => "TrueHD".to_string(),
        "flac" => "FLAC".to_string(),
        "opus" => "Opus".to_string(),
        "vorbis" => "Vorbis".to_string(),
        other => other.to_uppercase(),
    }
}

fn bit_depth(pix_fmt: &str) -> &'static str {
    if pix_fmt.contains("10le") || pix_fmt.contains("10be") {
        "10-bit"
    } else if pix_fmt.contains("12le") || pix_fmt.contains("12be") {
        "12-bit"
    } else {
        "8-bit"
    }
}

/// HDR tag from transfer function and color space.
///
/// PQ transfer means HDR10, HLG transfer means HLG; a wide-gamut bt2020
/// space at 10-bit without either transfer marker gets the generic tag.
fn hdr_tag(color_transfer: &str, color_space: &str, bit_depth: &str) -> String {
    let transfer = color_transfer.to_lowercase();
    if transfer.contains("smpte2084") {
        "HDR10".to_string()
    } else if transfer.contains("arib-std-b67") {
        "HLG".to_string()
    } else if color_space.to_lowercase().contains("bt2020") && bit_depth == "10-bit" {
        "HDR".to_string()
    } else {
        String::new()
    }
}

fn channel_layout(channels: u8) -> String {
    match channels {
        1 => "1.0".to_string(),
        2 => "2.0".to_string(),
        6 => "5.1".to_string(),
        8 => "7.1".to_string(),
        n => format!("{}.0", n),
    }
}

/// Render float seconds as zero-padded "HH:MM:SS".
pub fn format_duration(seconds: f64) -> String {
    let total = seconds as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Human-readable file size with two-decimal precision.
pub fn format_file_size(bytes: u64) -> String {
    const GB: u64 = 1024 * 1024 * 1024;
    const MB: u64 = 1024 * 1024;
    const KB: u64 = 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
