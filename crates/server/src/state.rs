use std::path::{Path, PathBuf};
use std::sync::Arc;

use packrat_core::config::ConfigError;
use packrat_core::tmdb::{CatalogError, TmdbClient};
use packrat_core::{
    load_config, save_config, Config, NameParser, Packager, Prober, SanitizedConfig, TorrentWriter,
};

/// Shared application state.
///
/// Holds the long-lived pieces only. Configuration is re-read from disk per
/// request so a `PUT /config` takes effect immediately, without a shared
/// mutable config value.
pub struct AppState {
    config_path: PathBuf,
    parser: Arc<dyn NameParser>,
    prober: Arc<dyn Prober>,
    packager: Packager,
}

impl AppState {
    pub fn new(
        config_path: PathBuf,
        parser: Arc<dyn NameParser>,
        prober: Arc<dyn Prober>,
        writer: Arc<dyn TorrentWriter>,
    ) -> Self {
        let packager = Packager::new(Arc::clone(&parser), writer);
        Self {
            config_path,
            parser,
            prober,
            packager,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load_config(&self) -> Result<Config, ConfigError> {
        load_config(&self.config_path)
    }

    pub fn save_config(&self, config: &Config) -> Result<(), ConfigError> {
        save_config(config, &self.config_path)
    }

    pub fn sanitized_config(&self) -> Result<SanitizedConfig, ConfigError> {
        Ok(SanitizedConfig::from(&self.load_config()?))
    }

    pub fn parser(&self) -> &dyn NameParser {
        self.parser.as_ref()
    }

    pub fn prober(&self) -> &dyn Prober {
        self.prober.as_ref()
    }

    pub fn packager(&self) -> &Packager {
        &self.packager
    }

    /// Build a catalog client from the current config.
    pub fn tmdb_client(&self, config: &Config) -> Result<TmdbClient, CatalogError> {
        match &config.tmdb {
            Some(tmdb) => TmdbClient::new(tmdb),
            None => Err(CatalogError::NotConfigured(
                "TMDB API key not set in config".to_string(),
            )),
        }
    }
}
