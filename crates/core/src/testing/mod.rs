//! Mock implementations of the capability traits for tests.
//!
//! Everything the pipeline talks to through a trait has a mock here, so
//! packaging flows can be exercised end to end without ffprobe, piece
//! hashing or the TMDB API.

mod mock_parser;
mod mock_prober;
mod mock_torrent_writer;

pub use mock_parser::MockParser;
pub use mock_prober::MockProber;
pub use mock_torrent_writer::MockTorrentWriter;
