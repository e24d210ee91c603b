//! Regex-based scene name parser.

use regex_lite::Regex;

use super::types::ParsedFacts;
use super::NameParser;

/// Parses scene-style release names with a fixed set of token patterns.
pub struct SceneParser {
    extension: Regex,
    season_episode: Regex,
    alt_season_episode: Regex,
    season_word: Regex,
    season_only: Regex,
    year: Regex,
    resolution: Regex,
    source: Regex,
    video_codec: Regex,
    audio_codec: Regex,
    group: Regex,
}

impl SceneParser {
    pub fn new() -> Self {
        Self {
            extension: Regex::new(r"\.([A-Za-z0-9]{2,4})$").unwrap(),
            season_episode: Regex::new(r"(?i)\bS(\d{1,2})[ ]?E(\d{1,3})\b").unwrap(),
            alt_season_episode: Regex::new(r"\b(\d{1,2})x(\d{2,3})\b").unwrap(),
            season_word: Regex::new(r"(?i)\bSeason[ ]+(\d{1,2})\b").unwrap(),
            season_only: Regex::new(r"(?i)\bS(\d{1,2})\b").unwrap(),
            year: Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap(),
            resolution: Regex::new(r"(?i)\b(2160p|1440p|1080p|720p|576p|480p|4k)\b").unwrap(),
            source: Regex::new(
                r"(?i)\b(blu-?ray|bd-?rip|br-?rip|web-?dl|web-?rip|hdtv|dvd-?rip|remux|web)\b",
            )
            .unwrap(),
            video_codec: Regex::new(r"(?i)\b(x264|x265|h[ .]?264|h[ .]?265|hevc|avc|av1|vp9|xvid)\b")
                .unwrap(),
            audio_codec: Regex::new(
                r"(?i)\b(aac|e-?ac-?3|ac-?3|dts-?hd|dts|truehd|flac|opus|vorbis|ddp)\b",
            )
            .unwrap(),
            group: Regex::new(r"-([A-Za-z0-9]+)$").unwrap(),
        }
    }
}

impl Default for SceneParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NameParser for SceneParser {
    fn parse(&self, name: &str) -> ParsedFacts {
        let mut facts = ParsedFacts::default();

        // Strip a recognized media extension before tokenizing.
        let mut stem = name;
        if let Some(caps) = self.extension.captures(name) {
            let ext = caps.get(1).map(|m| m.as_str().to_lowercase());
            if let Some(ext) = ext {
                if is_media_extension(&ext) {
                    facts.container = Some(ext);
                    stem = &name[..name.len() - caps.get(0).unwrap().as_str().len()];
                }
            }
        }

        if let Some(caps) = self.group.captures(stem) {
            let candidate = caps.get(1).unwrap().as_str();
            // Trailing "-DL"/"-ray" belongs to a source tag, not a group.
            if !matches!(candidate.to_ascii_uppercase().as_str(), "DL" | "RAY" | "RIP") {
                facts.release_group = Some(candidate.to_string());
            }
        }

        // Dots and underscores are separators in scene names.
        let normalized: String = stem
            .chars()
            .map(|c| if c == '.' || c == '_' { ' ' } else { c })
            .collect();

        // Markers bound the title span; track the earliest one.
        let mut cut = normalized.len();

        if let Some(caps) = self.season_episode.captures(&normalized) {
            facts.season = caps.get(1).and_then(|m| m.as_str().parse().ok());
            facts.episode = caps.get(2).and_then(|m| m.as_str().parse().ok());
            cut = cut.min(caps.get(0).unwrap().start());

            // Words between the episode marker and the next technical tag.
            let after = &normalized[caps.get(0).unwrap().end()..];
            let mut title_end = after.len();
            for re in [
                &self.resolution,
                &self.source,
                &self.video_codec,
                &self.audio_codec,
                &self.year,
            ] {
                if let Some(m) = re.find(after) {
                    title_end = title_end.min(m.start());
                }
            }
            let episode_title = after[..title_end].trim_matches([' ', '-']).to_string();
            if !episode_title.is_empty() {
                facts.episode_title = Some(episode_title);
            }
        } else if let Some(caps) = self.alt_season_episode.captures(&normalized) {
            facts.season = caps.get(1).and_then(|m| m.as_str().parse().ok());
            facts.episode = caps.get(2).and_then(|m| m.as_str().parse().ok());
            cut = cut.min(caps.get(0).unwrap().start());
        } else if let Some(caps) = self.season_word.captures(&normalized) {
            facts.season = caps.get(1).and_then(|m| m.as_str().parse().ok());
            cut = cut.min(caps.get(0).unwrap().start());
        } else if let Some(caps) = self.season_only.captures(&normalized) {
            facts.season = caps.get(1).and_then(|m| m.as_str().parse().ok());
            cut = cut.min(caps.get(0).unwrap().start());
        }

        // Scene names put the release year after the title, so the last
        // match wins when the title itself contains a year.
        if let Some(m) = self.year.find_iter(&normalized).last() {
            facts.year = m.as_str().parse().ok();
            cut = cut.min(m.start());
        }

        if let Some(m) = self.resolution.find(&normalized) {
            let tag = m.as_str().to_lowercase();
            facts.resolution = Some(if tag == "4k" { "2160p".to_string() } else { tag });
            cut = cut.min(m.start());
        }

        if let Some(m) = self.source.find(&normalized) {
            facts.source = Some(canonical_source(m.as_str()));
            cut = cut.min(m.start());
        }

        if let Some(m) = self.video_codec.find(&normalized) {
            facts.video_codec = Some(canonical_video_codec(m.as_str()));
            cut = cut.min(m.start());
        }

        if let Some(m) = self.audio_codec.find(&normalized) {
            facts.audio_codec = Some(canonical_audio_codec(m.as_str()));
            cut = cut.min(m.start());
        }

        let title = normalized[..cut].trim_matches([' ', '-']).to_string();
        if !title.is_empty() {
            facts.title = Some(title);
        }

        facts.movie = facts.season.is_none()
            && facts.episode.is_none()
            && facts.year.is_some()
            && facts.title.is_some();

        facts
    }
}

fn is_media_extension(ext: &str) -> bool {
    matches!(
        ext,
        "mp4" | "mkv" | "avi" | "mov" | "wmv" | "flv" | "webm" | "m4v" | "nfo" | "srt"
    )
}

fn canonical_source(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    match folded.as_str() {
        "bluray" => "BluRay".to_string(),
        "bdrip" => "BDRip".to_string(),
        "brrip" => "BRRip".to_string(),
        "webdl" => "WEB-DL".to_string(),
        "webrip" => "WEBRip".to_string(),
        "hdtv" => "HDTV".to_string(),
        "dvdrip" => "DVDRip".to_string(),
        "remux" => "REMUX".to_string(),
        "web" => "WEB".to_string(),
        _ => raw.to_string(),
    }
}

fn canonical_video_codec(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    match folded.as_str() {
        "x264" | "h264" | "avc" => "x264".to_string(),
        "x265" | "h265" | "hevc" => "x265".to_string(),
        "av1" => "AV1".to_string(),
        "vp9" => "VP9".to_string(),
        "xvid" => "XviD".to_string(),
        _ => raw.to_string(),
    }
}

fn canonical_audio_codec(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    match folded.as_str() {
        "aac" => "AAC".to_string(),
        "ac3" => "AC3".to_string(),
        "eac3" => "EAC3".to_string(),
        "dts" => "DTS".to_string(),
        "dtshd" => "DTS-HD".to_string(),
        "truehd" => "TrueHD".to_string(),
        "flac" => "FLAC".to_string(),
        "opus" => "Opus".to_string(),
        "vorbis" => "Vorbis".to_string(),
        "ddp" => "DDP".to_string(),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> ParsedFacts {
        SceneParser::new().parse(name)
    }

    #[test]
    fn test_parse_movie_name() {
        let facts = parse("The.Thing.1982.1080p.BluRay.x265-FROZEN.mkv");
        assert_eq!(facts.title.as_deref(), Some("The Thing"));
        assert_eq!(facts.year, Some(1982));
        assert_eq!(facts.resolution.as_deref(), Some("1080p"));
        assert_eq!(facts.source.as_deref(), Some("BluRay"));
        assert_eq!(facts.video_codec.as_deref(), Some("x265"));
        assert_eq!(facts.release_group.as_deref(), Some("FROZEN"));
        assert_eq!(facts.container.as_deref(), Some("mkv"));
        assert!(facts.movie);
        assert!(facts.season.is_none());
    }

    #[test]
    fn test_parse_episode_name() {
        let facts = parse("Show.Name.S02E05.The.Heist.720p.WEB-DL.x264-TEAM.mkv");
        assert_eq!(facts.title.as_deref(), Some("Show Name"));
        assert_eq!(facts.season, Some(2));
        assert_eq!(facts.episode, Some(5));
        assert_eq!(facts.episode_title.as_deref(), Some("The Heist"));
        assert_eq!(facts.source.as_deref(), Some("WEB-DL"));
        assert!(!facts.movie);
    }

    #[test]
    fn test_parse_season_pack_name() {
        let facts = parse("Show.Name.S03.2160p.WEB-DL.x265-PACK");
        assert_eq!(facts.season, Some(3));
        assert!(facts.episode.is_none());
        assert_eq!(facts.resolution.as_deref(), Some("2160p"));
        assert_eq!(facts.release_group.as_deref(), Some("PACK"));
    }

    #[test]
    fn test_parse_season_word_form() {
        let facts = parse("Show Name Season 4 Complete");
        assert_eq!(facts.season, Some(4));
        assert!(facts.episode.is_none());
    }

    #[test]
    fn test_parse_alt_episode_marker() {
        let facts = parse("Breaking.Show.1x05.hdtv.mkv");
        assert_eq!(facts.season, Some(1));
        assert_eq!(facts.episode, Some(5));
        assert_eq!(facts.source.as_deref(), Some("HDTV"));
    }

    #[test]
    fn test_year_in_title_takes_last_match() {
        let facts = parse("2FastCrew.2004.1080p.BluRay.x264.mkv");
        assert_eq!(facts.year, Some(2004));
    }

    #[test]
    fn test_webdl_suffix_is_not_a_group() {
        let facts = parse("Show.S01.1080p.WEB-DL");
        assert!(facts.release_group.is_none());
        assert_eq!(facts.source.as_deref(), Some("WEB-DL"));
    }

    #[test]
    fn test_unrecognized_name_yields_defaults() {
        let facts = parse("randomfile");
        assert!(facts.title.is_some());
        assert!(!facts.movie);
        assert!(facts.season.is_none());
        assert!(facts.episode.is_none());
    }
}
