//! NFO sidecar rendering.
//!
//! Fixed-layout plain text: header block, aligned label column, optional
//! plot, a file listing for season packs, and a closing rule with the
//! configured notes line.

use crate::classifier::MediaKind;
use crate::config::NfoConfig;
use crate::naming::ReleaseFields;
use crate::parser::ParsedFacts;

/// One file entry in a season pack listing.
#[derive(Debug, Clone)]
pub struct NfoFileEntry {
    pub name: String,
    pub size: String,
}

fn push_field(lines: &mut Vec<String>, label: &str, value: &str) {
    lines.push(format!("{:<12}: {}", label, value));
}

fn push_optional(lines: &mut Vec<String>, label: &str, value: &str) {
    if !value.is_empty() {
        push_field(lines, label, value);
    }
}

/// Shared technical block used by all three renderers.
fn push_technical(lines: &mut Vec<String>, fields: &ReleaseFields) {
    push_optional(lines, "Resolution", &fields.resolution);
    push_optional(lines, "Source", &fields.source);
    push_optional(lines, "Video Codec", &fields.video_codec);
    push_optional(lines, "Audio Codec", &fields.audio_codec);
    push_optional(lines, "Audio", &fields.audio_channels);
    push_optional(lines, "Bit Depth", &fields.bit_depth);
    push_optional(lines, "HDR Format", &fields.hdr_format);
    push_optional(lines, "Language", &fields.language);
}

fn push_ids(lines: &mut Vec<String>, fields: &ReleaseFields, tv: bool) {
    if !fields.imdb_id.is_empty() {
        push_field(
            lines,
            "IMDb",
            &format!("https://www.imdb.com/title/{}/", fields.imdb_id),
        );
    }
    if !fields.tmdb_id.is_empty() {
        let section = if tv { "tv" } else { "movie" };
        push_field(
            lines,
            "TMDB",
            &format!("https://www.themoviedb.org/{}/{}", section, fields.tmdb_id),
        );
    }
}

fn push_plot(lines: &mut Vec<String>, overview: &str) {
    if !overview.is_empty() {
        lines.push(String::new());
        lines.push("Plot:".to_string());
        lines.push(overview.to_string());
    }
}

fn finish(mut lines: Vec<String>, config: &NfoConfig) -> String {
    lines.push(String::new());
    lines.push("=".repeat(50));
    if config.include_notes && !config.notes_template.is_empty() {
        lines.push(String::new());
        lines.push(config.notes_template.clone());
    }
    lines.join("\n")
}

/// Render a movie NFO.
pub fn render_movie(config: &NfoConfig, fields: &ReleaseFields, filename: &str) -> String {
    let mut lines = vec![config.header.clone(), String::new()];

    push_field(&mut lines, "Title", &fields.title);
    push_field(&mut lines, "Year", &fields.year);
    push_field(&mut lines, "Type", "Movie");
    push_field(&mut lines, "Filename", filename);
    push_technical(&mut lines, fields);
    push_optional(&mut lines, "File Size", &fields.size);
    push_optional(&mut lines, "Runtime", &fields.runtime);
    push_optional(&mut lines, "Group", &fields.release_group);
    push_ids(&mut lines, fields, false);
    push_plot(&mut lines, &fields.overview);

    finish(lines, config)
}

/// Render a single-episode NFO.
pub fn render_episode(config: &NfoConfig, fields: &ReleaseFields, filename: &str) -> String {
    let mut lines = vec![config.header.clone(), String::new()];

    push_field(&mut lines, "Show", &fields.title);
    push_field(
        &mut lines,
        "Season",
        &fields.season.map(|s| s.to_string()).unwrap_or_default(),
    );
    push_field(
        &mut lines,
        "Episode",
        &fields.episode.map(|e| e.to_string()).unwrap_or_default(),
    );
    push_field(&mut lines, "Title", &fields.episode_title);
    push_field(&mut lines, "Year", &fields.year);
    push_field(&mut lines, "Type", "Episode");
    push_field(&mut lines, "Filename", filename);
    push_technical(&mut lines, fields);
    push_optional(&mut lines, "File Size", &fields.size);
    push_optional(&mut lines, "Runtime", &fields.runtime);
    push_optional(&mut lines, "Group", &fields.release_group);
    push_ids(&mut lines, fields, true);
    push_plot(&mut lines, &fields.overview);

    finish(lines, config)
}

/// Render a season pack NFO with a per-file listing.
pub fn render_season(
    config: &NfoConfig,
    fields: &ReleaseFields,
    folder_name: &str,
    files: &[NfoFileEntry],
) -> String {
    let mut lines = vec![config.header.clone(), String::new()];

    push_field(&mut lines, "Show", &fields.title);
    push_field(
        &mut lines,
        "Season",
        &fields.season.map(|s| s.to_string()).unwrap_or_default(),
    );
    push_field(&mut lines, "Year", &fields.year);
    push_field(&mut lines, "Type", "Season Pack");
    push_field(
        &mut lines,
        "Episodes",
        &fields.episode_count.unwrap_or(files.len()).to_string(),
    );
    push_field(&mut lines, "Folder", folder_name);
    push_technical(&mut lines, fields);
    push_optional(&mut lines, "Total Size", &fields.total_size);
    push_optional(&mut lines, "Group", &fields.release_group);
    push_ids(&mut lines, fields, true);
    push_plot(&mut lines, &fields.overview);

    lines.push(String::new());
    lines.push("-".repeat(50));
    lines.push("Files:".to_string());
    lines.push(String::new());
    for file in files {
        if file.size.is_empty() {
            lines.push(format!("  {}", file.name));
        } else {
            lines.push(format!("  {}  ({})", file.name, file.size));
        }
    }

    finish(lines, config)
}

/// Render the initial NFO written at intake, before the user edits fields.
pub fn render_parsed(
    config: &NfoConfig,
    facts: &ParsedFacts,
    filename: &str,
    kind: MediaKind,
) -> String {
    let mut lines = vec![config.header.clone(), String::new()];

    push_field(&mut lines, "Title", facts.title.as_deref().unwrap_or("Unknown"));
    push_field(
        &mut lines,
        "Year",
        &facts.year.map(|y| y.to_string()).unwrap_or_default(),
    );
    let kind_label = match kind {
        MediaKind::Movie => "Movie",
        MediaKind::Episode => "Episode",
        MediaKind::SeasonPack => "Season",
        MediaKind::Unknown => "Unknown",
    };
    push_field(&mut lines, "Type", kind_label);
    push_field(&mut lines, "Filename", filename);
    push_optional(&mut lines, "Resolution", facts.resolution.as_deref().unwrap_or(""));
    push_optional(&mut lines, "Source", facts.source.as_deref().unwrap_or(""));
    push_optional(&mut lines, "Video Codec", facts.video_codec.as_deref().unwrap_or(""));
    push_optional(&mut lines, "Audio Codec", facts.audio_codec.as_deref().unwrap_or(""));
    push_optional(&mut lines, "Group", facts.release_group.as_deref().unwrap_or(""));

    finish(lines, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NfoConfig {
        NfoConfig {
            header: "HEADER".to_string(),
            include_notes: true,
            notes_template: "Enjoy and seed!".to_string(),
        }
    }

    fn movie_fields() -> ReleaseFields {
        ReleaseFields {
            title: "The Thing".to_string(),
            year: "1982".to_string(),
            resolution: "1080p".to_string(),
            source: "BluRay".to_string(),
            video_codec: "x265".to_string(),
            audio_codec: "DTS".to_string(),
            audio_channels: "5.1".to_string(),
            bit_depth: "10-bit".to_string(),
            imdb_id: "tt0084787".to_string(),
            tmdb_id: "1091".to_string(),
            overview: "A shapeshifting alien terrorizes an outpost.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_movie_nfo_layout() {
        let nfo = render_movie(&config(), &movie_fields(), "The.Thing.1982.mkv");
        assert!(nfo.starts_with("HEADER\n"));
        assert!(nfo.contains("Title       : The Thing"));
        assert!(nfo.contains("Type        : Movie"));
        assert!(nfo.contains("Filename    : The.Thing.1982.mkv"));
        assert!(nfo.contains("IMDb        : https://www.imdb.com/title/tt0084787/"));
        assert!(nfo.contains("TMDB        : https://www.themoviedb.org/movie/1091"));
        assert!(nfo.contains("Plot:"));
        assert!(nfo.ends_with("Enjoy and seed!"));
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let fields = ReleaseFields {
            title: "Bare".to_string(),
            ..Default::default()
        };
        let nfo = render_movie(&config(), &fields, "Bare.mkv");
        assert!(!nfo.contains("Resolution"));
        assert!(!nfo.contains("HDR Format"));
        assert!(!nfo.contains("IMDb"));
    }

    #[test]
    fn test_episode_nfo_uses_tv_url() {
        let fields = ReleaseFields {
            title: "Show".to_string(),
            season: Some(1),
            episode: Some(2),
            episode_title: "Pilot Part 2".to_string(),
            tmdb_id: "603".to_string(),
            ..Default::default()
        };
        let nfo = render_episode(&config(), &fields, "Show.S01E02.mkv");
        assert!(nfo.contains("Show        : Show"));
        assert!(nfo.contains("Season      : 1"));
        assert!(nfo.contains("Episode     : 2"));
        assert!(nfo.contains("https://www.themoviedb.org/tv/603"));
    }

    #[test]
    fn test_season_nfo_lists_every_file() {
        let fields = ReleaseFields {
            title: "Show".to_string(),
            season: Some(1),
            total_size: "12.00 GB".to_string(),
            ..Default::default()
        };
        let files = vec![
            NfoFileEntry {
                name: "Show.S01E01.mkv".to_string(),
                size: "4.00 GB".to_string(),
            },
            NfoFileEntry {
                name: "Show.S01E02.mkv".to_string(),
                size: "8.00 GB".to_string(),
            },
        ];
        let nfo = render_season(&config(), &fields, "Show.S01.1080p", &files);
        assert!(nfo.contains("Type        : Season Pack"));
        assert!(nfo.contains("Episodes    : 2"));
        assert!(nfo.contains("Folder      : Show.S01.1080p"));
        assert!(nfo.contains("Total Size  : 12.00 GB"));
        assert!(nfo.contains("  Show.S01E01.mkv  (4.00 GB)"));
        assert!(nfo.contains("  Show.S01E02.mkv  (8.00 GB)"));
        assert!(nfo.contains(&"-".repeat(50)));
    }

    #[test]
    fn test_notes_disabled() {
        let config = NfoConfig {
            include_notes: false,
            ..config()
        };
        let nfo = render_movie(&config, &movie_fields(), "x.mkv");
        assert!(!nfo.contains("Enjoy and seed!"));
        assert!(nfo.ends_with(&"=".repeat(50)));
    }
}
