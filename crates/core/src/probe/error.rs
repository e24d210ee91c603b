use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while probing a media file.
///
/// All of these are recoverable at the pipeline level: `gather` turns them
/// into default-empty facts.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Probe binary missing from the configured path.
    #[error("ffprobe not found at: {path}")]
    NotFound { path: String },

    /// Probe exceeded its configured deadline.
    #[error("ffprobe timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Probe ran but exited non-zero.
    #[error("ffprobe failed: {stderr}")]
    Failed { stderr: String },

    /// Probe output was not the expected JSON.
    #[error("Failed to parse ffprobe output: {0}")]
    ParseError(String),

    /// Input file does not exist.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
