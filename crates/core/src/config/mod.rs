//! Service configuration: naming templates, output directory, trackers,
//! NFO options, and external tool settings.

mod loader;
mod types;
mod validate;

use thiserror::Error;

pub use loader::{load_config, load_config_from_str, save_config};
pub use types::{
    expand_tilde, Config, NamingConfig, NfoConfig, ProbeConfig, SanitizedConfig,
    SanitizedTmdbConfig, ServerConfig, TmdbConfig,
};
pub use validate::validate_config;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid config: {0}")]
    ValidationError(String),

    #[error("Failed to write config: {0}")]
    WriteError(String),
}
