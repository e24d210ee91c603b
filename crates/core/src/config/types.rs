use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    /// Directory where release folders and .torrent files are produced.
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
    /// Tracker announce URLs embedded in created torrents.
    #[serde(default)]
    pub trackers: Vec<String>,
    /// Default release group suffix when the source name carries none.
    #[serde(default = "default_release_group")]
    pub release_group: String,
    #[serde(default)]
    pub nfo: NfoConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            naming: NamingConfig::default(),
            output_directory: default_output_directory(),
            trackers: Vec::new(),
            release_group: default_release_group(),
            nfo: NfoConfig::default(),
            probe: ProbeConfig::default(),
            tmdb: None,
        }
    }
}

impl Config {
    /// Output directory with a leading `~` expanded to the user's home.
    pub fn output_dir(&self) -> PathBuf {
        expand_tilde(&self.output_directory)
    }
}

/// Expand a leading `~` path component against `$HOME`.
pub fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    path.to_path_buf()
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "127.0.0.1".parse().unwrap()
}

fn default_port() -> u16 {
    8000
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("~/Documents/torrents")
}

fn default_release_group() -> String {
    "GROUP".to_string()
}

/// Naming templates, one per media kind.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamingConfig {
    #[serde(default = "default_movie_template")]
    pub movie: String,
    #[serde(default = "default_episode_template")]
    pub episode: String,
    #[serde(default = "default_season_template")]
    pub season: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            movie: default_movie_template(),
            episode: default_episode_template(),
            season: default_season_template(),
        }
    }
}

fn default_movie_template() -> String {
    "{title}.{year}.{quality}.{source}.{codec}-{group}".to_string()
}

fn default_episode_template() -> String {
    "{title}.S{season:02}E{episode:02}.{episode_title}.{quality}.{source}.{codec}-{group}"
        .to_string()
}

fn default_season_template() -> String {
    "{title}.S{season:02}.{quality}.{source}.{codec}-{group}".to_string()
}

/// NFO rendering options.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NfoConfig {
    /// Header block printed at the top of every NFO.
    #[serde(default = "default_nfo_header")]
    pub header: String,
    #[serde(default = "default_true")]
    pub include_notes: bool,
    #[serde(default = "default_notes")]
    pub notes_template: String,
}

impl Default for NfoConfig {
    fn default() -> Self {
        Self {
            header: default_nfo_header(),
            include_notes: true,
            notes_template: default_notes(),
        }
    }
}

fn default_nfo_header() -> String {
    "═══════════════════════════════════════════════════\n  PACKRAT\n═══════════════════════════════════════════════════".to_string()
}

fn default_true() -> bool {
    true
}

fn default_notes() -> String {
    "Enjoy and seed!".to_string()
}

/// Media prober settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,
    /// Maximum seconds to wait for a single probe.
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: default_ffprobe_path(),
            timeout_secs: default_probe_timeout(),
        }
    }
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_probe_timeout() -> u64 {
    10
}

/// TMDB catalog settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// TMDB API key (required for catalog lookups).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub naming: NamingConfig,
    pub output_directory: PathBuf,
    pub trackers: Vec<String>,
    pub release_group: String,
    pub nfo: NfoConfig,
    pub probe: ProbeConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<SanitizedTmdbConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub api_key: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            naming: config.naming.clone(),
            output_directory: config.output_directory.clone(),
            trackers: config.trackers.clone(),
            release_group: config.release_group.clone(),
            nfo: config.nfo.clone(),
            probe: config.probe.clone(),
            tmdb: config.tmdb.as_ref().map(|t| SanitizedTmdbConfig {
                api_key: if t.api_key.is_empty() {
                    String::new()
                } else {
                    "***".to_string()
                },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates() {
        let config = Config::default();
        assert_eq!(
            config.naming.movie,
            "{title}.{year}.{quality}.{source}.{codec}-{group}"
        );
        assert!(config.naming.episode.contains("{season:02}"));
        assert!(config.naming.season.contains("S{season:02}"));
    }

    #[test]
    fn test_sanitized_config_redacts_api_key() {
        let config = Config {
            tmdb: Some(TmdbConfig {
                api_key: "secret".to_string(),
                base_url: None,
            }),
            ..Config::default()
        };
        let sanitized = SanitizedConfig::from(&config);
        assert_eq!(sanitized.tmdb.unwrap().api_key, "***");
    }

    #[test]
    fn test_expand_tilde() {
        std::env::set_var("HOME", "/home/tester");
        let expanded = expand_tilde(std::path::Path::new("~/Documents/torrents"));
        assert_eq!(expanded, PathBuf::from("/home/tester/Documents/torrents"));

        let absolute = expand_tilde(std::path::Path::new("/data/torrents"));
        assert_eq!(absolute, PathBuf::from("/data/torrents"));
    }
}
