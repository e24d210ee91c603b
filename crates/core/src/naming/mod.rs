//! Canonical release naming.
//!
//! Renders the template for a media kind against a field set and cleans the
//! result into a canonical base name: no doubled separators, no leading or
//! trailing separator, no unresolved placeholder. An empty result means the
//! template produced no usable name and the caller must reject the request.

mod template;
mod types;

pub use template::render;
pub use types::ReleaseFields;
