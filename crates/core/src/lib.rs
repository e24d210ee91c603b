pub mod classifier;
pub mod config;
pub mod library;
pub mod metrics;
pub mod naming;
pub mod nfo;
pub mod packager;
pub mod parser;
pub mod probe;
pub mod testing;
pub mod tmdb;
pub mod torrent;

pub use classifier::{classify, classify_folder, MediaKind};
pub use config::{
    load_config, load_config_from_str, save_config, validate_config, Config, ConfigError,
    SanitizedConfig,
};
pub use naming::{render, ReleaseFields};
pub use packager::{Packager, PackagerError, TargetLocks};
pub use parser::{NameParser, ParsedFacts, SceneParser};
pub use probe::{FfprobeProber, MetadataFacts, Prober};
pub use torrent::{LibrqbitWriter, TorrentWriter};
