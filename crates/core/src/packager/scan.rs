//! Folder enumeration helpers shared by the pipeline and the library views.

use std::path::Path;

use super::PackagerError;

/// File extensions recognized as video content.
pub const VIDEO_EXTENSIONS: [&str; 8] = [
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v",
];

/// True when the file name carries a recognized video extension.
pub fn is_video_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// All video file names directly inside a folder, sorted by name.
pub async fn find_video_files(folder: &Path) -> Result<Vec<String>, PackagerError> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(folder).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_video_file(&name) {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

/// First video file in a folder, with its extension (leading dot included).
pub async fn find_first_video(folder: &Path) -> Result<Option<(String, String)>, PackagerError> {
    let files = find_video_files(folder).await?;
    Ok(files.into_iter().next().map(|name| {
        let ext = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        (name, ext)
    }))
}
