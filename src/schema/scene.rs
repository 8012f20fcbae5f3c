use serde::{Deserialize, Serialize};

/// An ordered segment of the screenplay, bounded by scene headings.
///
/// Scenes are created by the segmenter with 1-based sequential numbers
/// and verbatim content (the heading line included). The persistence
/// layer owns identity after that and may renumber or reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    /// 1-based, monotonically increasing within one parse pass.
    pub number: u32,
    /// The heading with any forced-heading marker stripped.
    pub heading: String,
    pub location: String,
    pub time_of_day: String,
    /// Canonical names of characters who speak in this scene, in order
    /// of first cue.
    pub characters: Vec<String>,
    /// 0-based index of the heading line.
    pub start_line: usize,
    /// 0-based index of the last line before the next heading (or the
    /// final line of the document). Always >= `start_line`.
    pub end_line: usize,
    /// Verbatim text from the heading line to `end_line`.
    pub content: String,
}

impl Scene {
    /// Split a heading (prefix marker already stripped) into
    /// `(location, time_of_day)`.
    ///
    /// The INT/EXT prefix is removed, then the remainder is split on the
    /// first dash, en-dash, or em-dash. A heading with no dash yields an
    /// empty time-of-day.
    pub fn parse_heading(heading: &str) -> (String, String) {
        let rest = strip_scene_prefix(heading);
        for dash in ['-', '–', '—'] {
            if let Some((loc, time)) = rest.split_once(dash) {
                return (loc.trim().to_string(), time.trim().to_string());
            }
        }
        (rest.trim().to_string(), String::new())
    }
}

/// Remove the leading INT./EXT./INT/EXT/I/E marker from a heading.
fn strip_scene_prefix(heading: &str) -> &str {
    for prefix in ["INT./EXT.", "INT/EXT.", "INT./EXT", "INT/EXT", "I/E.", "I/E", "INT.", "EXT.", "INT", "EXT"] {
        let Some(head) = heading.get(..prefix.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(prefix) {
            continue;
        }
        let rest = &heading[prefix.len()..];
        // A bare prefix needs a boundary, or INTENSE/EXTERIOR would lose
        // their first letters.
        if !prefix.ends_with('.') && !(rest.is_empty() || rest.starts_with(['.', ' '])) {
            continue;
        }
        return rest.trim_start_matches(['.', ' ']);
    }
    heading
}
