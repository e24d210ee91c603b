use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Naming templates are non-empty and carry no path separators
/// - Probe timeout is non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    for (name, template) in [
        ("naming.movie", &config.naming.movie),
        ("naming.episode", &config.naming.episode),
        ("naming.season", &config.naming.season),
    ] {
        if template.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} template cannot be empty",
                name
            )));
        }
        if template.contains('/') || template.contains('\\') {
            return Err(ConfigError::ValidationError(format!(
                "{} template cannot contain path separators",
                name
            )));
        }
    }

    if config.probe.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "probe.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
