//! Two-phase season batch rename.
//!
//! Phase one computes the full target-name set and validates it against
//! internal collisions and pre-existing files; phase two applies the
//! renames. Any collision rejects the whole batch before a single file
//! moves, so the folder never ends up half-renamed.

use std::collections::HashSet;
use std::path::Path;

use super::PackagerError;
use crate::naming::ReleaseFields;
use crate::parser::NameParser;

/// One planned rename inside the season folder. `from == to` marks a file
/// kept as-is (unparsable episode number, or already canonical).
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRename {
    pub from: String,
    pub to: String,
}

/// Validated rename set for one season folder.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub renames: Vec<PlannedRename>,
}

impl BatchPlan {
    /// Final file names in original enumeration order.
    pub fn target_names(&self) -> Vec<String> {
        self.renames.iter().map(|r| r.to.clone()).collect()
    }
}

/// Canonical episode file name: `Show.S01E02.quality.source.codec-group.ext`.
///
/// Returns `None` when the parser finds no episode number; such files keep
/// their original name and are reported unchanged.
pub fn plan_episode_name(
    parser: &dyn NameParser,
    fields: &ReleaseFields,
    file_name: &str,
) -> Option<String> {
    let episode = parser.parse(file_name).episode?;
    let season = fields.season.unwrap_or(0);

    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let mut name = format!(
        "{}.S{:02}E{:02}",
        fields.title.replace(' ', "."),
        season,
        episode
    );
    for tag in [&fields.resolution, &fields.source, &fields.video_codec] {
        if !tag.is_empty() {
            name.push('.');
            name.push_str(tag);
        }
    }
    if !fields.release_group.is_empty() {
        name.push('-');
        name.push_str(&fields.release_group);
    }
    name.push_str(&ext);
    Some(name)
}

/// Phase one: compute and validate the full rename set.
///
/// Rejects duplicate targets within the batch and targets that already
/// exist on disk (other than the file itself keeping its name).
pub async fn plan_batch(
    parser: &dyn NameParser,
    fields: &ReleaseFields,
    folder: &Path,
    files: &[String],
) -> Result<BatchPlan, PackagerError> {
    let mut renames = Vec::with_capacity(files.len());
    let mut seen = HashSet::new();

    for file in files {
        let to = plan_episode_name(parser, fields, file).unwrap_or_else(|| file.clone());
        if !seen.insert(to.clone()) {
            return Err(PackagerError::BatchCollision(format!(
                "two files would rename to '{}'",
                to
            )));
        }
        renames.push(PlannedRename {
            from: file.clone(),
            to,
        });
    }

    let sources: HashSet<&String> = files.iter().collect();
    for rename in &renames {
        if rename.from == rename.to {
            continue;
        }
        // A target equal to another source file's current name would
        // clobber it mid-batch.
        if sources.contains(&rename.to) || folder.join(&rename.to).exists() {
            return Err(PackagerError::BatchCollision(format!(
                "a file named '{}' already exists",
                rename.to
            )));
        }
    }

    Ok(BatchPlan { renames })
}

/// Phase two: apply a validated plan. No-op entries are skipped.
pub async fn apply_batch(folder: &Path, plan: &BatchPlan) -> Result<(), PackagerError> {
    for rename in &plan.renames {
        if rename.from == rename.to {
            continue;
        }
        tokio::fs::rename(folder.join(&rename.from), folder.join(&rename.to)).await?;
    }
    Ok(())
}
