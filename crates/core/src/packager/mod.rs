//! The packaging pipeline.
//!
//! Turns an intake folder into a canonically-named, tracker-ready release:
//! conflict pre-flight, season batch rename, video/folder rename, NFO
//! replacement and .torrent writing, all serialized per target name.

mod batch;
mod conflict;
mod error;
mod locks;
mod pipeline;
mod scan;
mod types;

pub use batch::{apply_batch, plan_batch, plan_episode_name, BatchPlan, PlannedRename};
pub use conflict::{check_target, IncomingDescriptor};
pub use error::PackagerError;
pub use locks::TargetLocks;
pub use pipeline::Packager;
pub use scan::{find_first_video, find_video_files, is_video_file, VIDEO_EXTENSIONS};
pub use types::{
    ConflictResult, PlannedFile, ReleasePreview, ReleaseReport, TargetDescriptor,
};
