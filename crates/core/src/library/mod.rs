//! The release library: intake, listing, details and deletion of release
//! folders under the output directory.

mod error;
mod intake;
mod trash;
mod views;

pub use error::LibraryError;
pub use intake::{
    check_file_conflict, check_season_conflict, intake_file, intake_season, FileSizeEntry,
    IntakeOutcome, SeasonIntakeOutcome,
};
pub use trash::{delete_capability, delete_release, DeleteCapability, DeleteMethod};
pub use views::{list_releases, release_details, ReleaseDetails, ReleaseEntry};
