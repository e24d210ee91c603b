//! Filename fact extraction.
//!
//! Release names carry structured facts (show/title, year, SxxEyy markers,
//! resolution, source, codecs, group) in loosely standardized scene format.
//! The `NameParser` trait is the seam the rest of the pipeline consumes;
//! `SceneParser` is the shipped regex-based implementation and tests can
//! substitute `testing::MockParser`.

mod scene;
mod types;

pub use scene::SceneParser;
pub use types::ParsedFacts;

/// Extracts facts from a file or folder name.
///
/// Implementations must be pure: same input, same output, no side effects.
pub trait NameParser: Send + Sync {
    fn parse(&self, name: &str) -> ParsedFacts;
}
