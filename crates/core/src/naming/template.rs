//! Template rendering and cleanup.

use regex_lite::Regex;

use super::types::ReleaseFields;
use crate::classifier::MediaKind;

/// Render a naming template for the given kind into a canonical base name.
///
/// An empty return value means the template produced no usable name; callers
/// must treat that as a validation failure, never as a valid name.
pub fn render(template: &str, kind: MediaKind, fields: &ReleaseFields) -> String {
    let mut result = template.to_string();

    // Literal placeholders first. Title-like values get the dot separator;
    // the rest are substituted verbatim.
    result = result.replace("{title}", &dotted(&fields.title));
    result = result.replace("{year}", &clean_value(&fields.year));
    result = result.replace("{quality}", &clean_value(&fields.resolution));
    result = result.replace("{source}", &clean_value(&fields.source));
    result = result.replace("{codec}", &clean_value(&fields.video_codec));
    result = result.replace("{group}", &clean_value(&fields.release_group));
    result = result.replace("{episode_title}", &dotted(&fields.episode_title));

    // Width-formatted season/episode tokens must be handled before the bare
    // ones: the bare substitution would consume "{season" out of
    // "{season:02}" and leave ":02}" behind.
    if matches!(kind, MediaKind::Episode | MediaKind::SeasonPack) {
        let season = fields.season.unwrap_or(0);
        let episode = fields.episode.unwrap_or(0);

        let formatted = Regex::new(r"\{(season|episode):([^}]+)\}").unwrap();
        result = formatted
            .replace_all(&result, |caps: &regex_lite::Captures<'_>| {
                let value = match &caps[1] {
                    "season" => season,
                    _ => episode,
                };
                apply_width(value, &caps[2])
            })
            .into_owned();

        result = result.replace("{season}", &season.to_string());
        result = result.replace("{episode}", &episode.to_string());
    }

    // Anything still in braces is a placeholder the kind does not carry;
    // drop it so the guarantee of no unresolved tokens holds for every
    // template the user can write.
    let leftover = Regex::new(r"\{[^{}]*\}").unwrap();
    result = leftover.replace_all(&result, "").into_owned();

    cleanup(&result)
}

/// Zero-pad `value` per a `{field:spec}` width specifier.
///
/// Accepts the numeric forms "02", "2" and "03d"; anything else falls
/// back to the unpadded value.
fn apply_width(value: u32, spec: &str) -> String {
    let digits = spec.strip_suffix('d').unwrap_or(spec);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(width) = digits.parse::<usize>() {
            return format!("{:0width$}", value, width = width);
        }
    }
    value.to_string()
}

/// Cleanup pass over a substituted template.
///
/// Collapses runs of separator dots left by empty fields, turns ".-" into a
/// bare hyphen so an empty group does not leave a dot before the suffix, and
/// strips separators from both ends.
fn cleanup(name: &str) -> String {
    let mut result = name.to_string();
    while result.contains("..") {
        result = result.replace("..", ".");
    }
    result = result.replace(".-", "-");
    result.trim_matches(['.', '-']).to_string()
}

/// Convert spaces to the canonical dot separator, dropping characters that
/// would break out of a single path component.
fn dotted(value: &str) -> String {
    clean_value(value).replace(' ', ".")
}

/// Strip path separators and line breaks from a substituted value.
fn clean_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\n' | '\r'))
        .collect()
}
