//! Soft deletion of release folders.
//!
//! Deleted folders move into a `.trash` directory under the output dir so a
//! mistaken delete can be undone by hand. A move that fails (read-only
//! trash, cross-device rename) falls back to permanent removal.

use std::path::Path;

use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};

use super::LibraryError;
use crate::config::{expand_tilde, Config};

/// How a delete was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMethod {
    Trash,
    Permanent,
}

/// What deleting will do on this system.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteCapability {
    pub has_trash: bool,
    pub platform: &'static str,
    pub message: &'static str,
}

/// Delete a release folder, preferring the trash directory.
pub async fn delete_release(
    config: &Config,
    folder_path: &str,
) -> Result<DeleteMethod, LibraryError> {
    let folder = expand_tilde(Path::new(folder_path));
    if !folder.is_dir() {
        return Err(LibraryError::FolderNotFound(folder));
    }

    let name = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(trashed) = move_to_trash(config, &folder, &name).await {
        info!(folder = %folder.display(), trashed = %trashed, "moved release to trash");
        return Ok(DeleteMethod::Trash);
    }

    warn!(folder = %folder.display(), "trash unavailable, deleting permanently");
    tokio::fs::remove_dir_all(&folder)
        .await
        .map_err(|e| LibraryError::DeleteFailed(e.to_string()))?;
    Ok(DeleteMethod::Permanent)
}

/// Try the trash move. Timestamped target name avoids clobbering an earlier
/// delete of the same release.
async fn move_to_trash(config: &Config, folder: &Path, name: &str) -> Option<String> {
    let trash_dir = config.output_dir().join(".trash");
    tokio::fs::create_dir_all(&trash_dir).await.ok()?;

    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let target = trash_dir.join(format!("{}-{}", stamp, name));
    tokio::fs::rename(folder, &target).await.ok()?;
    Some(target.to_string_lossy().into_owned())
}

/// Report trash availability for the delete confirmation dialog.
///
/// The trash directory lives under the output dir, so it is available
/// whenever that directory is writable; the check is optimistic.
pub fn delete_capability() -> DeleteCapability {
    let platform = std::env::consts::OS;
    DeleteCapability {
        has_trash: true,
        platform,
        message: "This torrent will be moved to the trash directory.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_moves_into_trash() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Old.Release");
        tokio::fs::create_dir(&folder).await.unwrap();
        tokio::fs::write(folder.join("old.mkv"), b"x").await.unwrap();

        let config = Config {
            output_directory: dir.path().to_path_buf(),
            ..Config::default()
        };
        let method = delete_release(&config, folder.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(method, DeleteMethod::Trash);
        assert!(!folder.exists());

        let mut trashed = tokio::fs::read_dir(dir.path().join(".trash")).await.unwrap();
        let entry = trashed.next_entry().await.unwrap().unwrap();
        let name = entry.file_name().to_string_lossy().into_owned();
        assert!(name.ends_with("-Old.Release"));
        assert!(entry.path().join("old.mkv").exists());
    }

    #[tokio::test]
    async fn test_delete_missing_folder_is_client_error() {
        let config = Config::default();
        let result = delete_release(&config, "/nonexistent/release").await;
        assert!(matches!(result, Err(LibraryError::FolderNotFound(_))));
    }
}
