/// Line-level element classification for Fountain text.
///
/// Classification is an ordered chain of pure predicates: scene heading,
/// transition, parenthetical, character cue, then action as the default.
/// The order matters — an all-caps scene heading must never be read as a
/// character cue. Dialogue is positional and decided by the tokenizer,
/// not here.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Minimum trimmed length for a character cue.
pub const MIN_CUE_LEN: usize = 2;
/// Maximum trimmed length for a character cue.
pub const MAX_CUE_LEN: usize = 40;
/// Maximum word count for a character cue.
pub const MAX_CUE_WORDS: usize = 5;

/// Cinematic directives that look like cues but never name a speaker.
/// Compared after stripping any trailing `:` or `.`.
const CUE_EXCLUSIONS: &[&str] = &[
    "FADE IN",
    "FADE OUT",
    "FADE TO BLACK",
    "CUT TO",
    "CUT TO BLACK",
    "DISSOLVE TO",
    "SMASH CUT",
    "MATCH CUT",
    "JUMP CUT",
    "CONTINUED",
    "MORE",
    "MONTAGE",
    "END MONTAGE",
    "INTERCUT",
    "FLASHBACK",
    "END FLASHBACK",
    "TITLE",
    "SUPER",
    "THE END",
    "BACK TO SCENE",
    "LATER",
    "CONTINUOUS",
];

static SCENE_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(INT\.?/EXT|INT|EXT|I/E)[.\s]").expect("valid scene heading regex")
});

static TRAILING_EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("valid cue extension regex"));

/// The element type of a single line of Fountain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    SceneHeading,
    Character,
    Dialogue,
    Parenthetical,
    Action,
    Transition,
}

/// Strip a forced-heading marker (`!` or a single leading `.`, but not
/// `..`/`...`) from a line, returning the remainder and whether a marker
/// was present.
pub fn strip_forced_marker(line: &str) -> (&str, bool) {
    if let Some(rest) = line.strip_prefix('!') {
        return (rest.trim_start(), true);
    }
    if let Some(rest) = line.strip_prefix('.') {
        if !rest.starts_with('.') {
            return (rest.trim_start(), true);
        }
    }
    (line, false)
}

/// True if the trimmed line opens a new scene.
pub fn is_scene_heading(line: &str) -> bool {
    let (rest, forced) = strip_forced_marker(line);
    if forced {
        return !rest.is_empty();
    }
    SCENE_HEADING_RE.is_match(line)
}

/// True if the trimmed line is a transition (`CUT TO:` and friends).
pub fn is_transition(line: &str) -> bool {
    let upper = line.to_uppercase();
    upper.ends_with("TO:") || upper == "FADE IN:" || upper == "FADE OUT."
}

/// True if the trimmed line is a standalone parenthetical.
pub fn is_parenthetical(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('(') && line.ends_with(')')
}

/// True if the trimmed line is a character cue.
///
/// A cue is entirely uppercase, within the length and word-count caps,
/// contains at least one letter, and is none of the look-alikes: a scene
/// heading, a cinematic directive, a transition tail, a parenthetical,
/// a centered-text marker, or a page/act/scene ordinal marker.
pub fn is_character_cue(line: &str) -> bool {
    let char_count = line.chars().count();
    if char_count < MIN_CUE_LEN || char_count > MAX_CUE_LEN {
        return false;
    }
    if line != line.to_uppercase() || !line.chars().any(|c| c.is_alphabetic()) {
        return false;
    }
    if line.split_whitespace().count() > MAX_CUE_WORDS {
        return false;
    }
    if is_scene_heading(line) {
        return false;
    }
    if line.ends_with("TO:") || line.ends_with('.') {
        return false;
    }
    if line.starts_with('(') && line.ends_with(')') {
        return false;
    }
    if line.starts_with('>') && line.ends_with('<') {
        return false;
    }
    if is_ordinal_marker(line) {
        return false;
    }
    let bare = line.trim_end_matches([':', '.']).trim_end();
    !CUE_EXCLUSIONS.contains(&bare)
}

/// Page/act/scene ordinal markers ("ACT ONE", "SCENE 5", "END OF ACT").
fn is_ordinal_marker(line: &str) -> bool {
    if line.starts_with("END OF") {
        return true;
    }
    matches!(
        line.split_whitespace().next(),
        Some("ACT" | "SCENE" | "PAGE" | "PROLOGUE" | "EPILOGUE")
    )
}

/// Canonical speaker name for a cue line: trailing parenthetical
/// extensions (`(V.O.)`, `(CONT'D)`, numeric disambiguators) stripped,
/// uppercased.
pub fn canonical_speaker_name(line: &str) -> String {
    let mut name = line.trim().to_string();
    while TRAILING_EXTENSION_RE.is_match(&name) {
        name = TRAILING_EXTENSION_RE.replace(&name, "").into_owned();
    }
    name.trim().to_uppercase()
}

/// Classify one trimmed line without positional context.
///
/// Never returns `Dialogue` — the dialogue/action split needs to know
/// whether a dialogue block is open, which only the caller tracks.
pub fn classify_line(line: &str) -> ElementType {
    if line.is_empty() {
        return ElementType::Action;
    }
    if is_scene_heading(line) {
        ElementType::SceneHeading
    } else if is_transition(line) {
        ElementType::Transition
    } else if is_parenthetical(line) {
        ElementType::Parenthetical
    } else if is_character_cue(line) {
        ElementType::Character
    } else {
        ElementType::Action
    }
}

/// Classify one trimmed line, resolving the dialogue/action ambiguity.
///
/// A line that would otherwise be action is dialogue when it directly
/// continues an open dialogue block (cue or parenthetical above, no
/// blank-line break).
pub fn classify_with_context(line: &str, in_dialogue: bool) -> ElementType {
    match classify_line(line) {
        ElementType::Action if in_dialogue => ElementType::Dialogue,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_headings_match() {
        assert!(is_scene_heading("INT. OFFICE - DAY"));
        assert!(is_scene_heading("EXT. BEACH - SUNSET"));
        assert!(is_scene_heading("int. office - day"));
        assert!(is_scene_heading("INT./EXT. CAR - NIGHT"));
        assert!(is_scene_heading("I/E WAREHOUSE - NIGHT"));
        assert!(is_scene_heading("INT OFFICE"));
    }

    #[test]
    fn scene_heading_forced_markers() {
        assert!(is_scene_heading("!SOMEWHERE STRANGE"));
        assert!(is_scene_heading(".ROOFTOP - NIGHT"));
        // An ellipsis is action, not a forced heading
        assert!(!is_scene_heading("...and then silence."));
    }

    #[test]
    fn strip_forced_marker_variants() {
        assert_eq!(strip_forced_marker("!FORCED"), ("FORCED", true));
        assert_eq!(strip_forced_marker(".ROOFTOP"), ("ROOFTOP", true));
        assert_eq!(strip_forced_marker("..weird"), ("..weird", false));
        assert_eq!(strip_forced_marker("plain"), ("plain", false));
    }

    #[test]
    fn non_headings_rejected() {
        assert!(!is_scene_heading("JOHN"));
        assert!(!is_scene_heading("INTO THE WOODS"));
        assert!(!is_scene_heading("He walked inside."));
    }

    #[test]
    fn character_cues_match() {
        assert!(is_character_cue("JOHN"));
        assert!(is_character_cue("SARAH CONNOR"));
        assert!(is_character_cue("JOHN (V.O.)"));
        assert!(is_character_cue("COP #1"));
    }

    #[test]
    fn character_cue_rejects_headings_first() {
        // Order sensitivity: all-caps scene headings are not cues
        assert!(!is_character_cue("INT. OFFICE - DAY"));
        assert!(!is_character_cue("EXT. BEACH"));
    }

    #[test]
    fn character_cue_rejects_directives() {
        assert!(!is_character_cue("FADE IN:"));
        assert!(!is_character_cue("CUT TO:"));
        assert!(!is_character_cue("MONTAGE"));
        assert!(!is_character_cue("MORE"));
        assert!(!is_character_cue("CONTINUED:"));
        assert!(!is_character_cue("THE END"));
    }

    #[test]
    fn character_cue_rejects_shape_mismatches() {
        assert!(!is_character_cue("J")); // too short
        assert!(!is_character_cue("A VERY LONG LINE OF SHOUTED ACTION TEXT THAT KEEPS GOING")); // too long
        assert!(!is_character_cue("ONE TWO THREE FOUR FIVE SIX")); // too many words
        assert!(!is_character_cue("Hello there")); // not uppercase
        assert!(!is_character_cue("123")); // no letters
        assert!(!is_character_cue("(BEAT)")); // parenthetical
        assert!(!is_character_cue(">CENTERED<"));
        assert!(!is_character_cue("HE LEFT.")); // trailing period
        assert!(!is_character_cue("ACT ONE"));
        assert!(!is_character_cue("SCENE 5"));
        assert!(!is_character_cue("END OF ACT ONE"));
    }

    #[test]
    fn transitions_match() {
        assert!(is_transition("CUT TO:"));
        assert!(is_transition("DISSOLVE TO:"));
        assert!(is_transition("FADE IN:"));
        assert!(is_transition("FADE OUT."));
        assert!(!is_transition("JOHN"));
        assert!(!is_transition("He turned to go."));
    }

    #[test]
    fn canonical_name_strips_extensions() {
        assert_eq!(canonical_speaker_name("JOHN (V.O.)"), "JOHN");
        assert_eq!(canonical_speaker_name("JOHN (CONT'D)"), "JOHN");
        assert_eq!(canonical_speaker_name("SARAH (O.S.) (CONT'D)"), "SARAH");
        assert_eq!(canonical_speaker_name("COP (2)"), "COP");
        assert_eq!(canonical_speaker_name("john"), "JOHN");
    }

    #[test]
    fn classify_order_is_heading_first() {
        assert_eq!(classify_line("INT. OFFICE - DAY"), ElementType::SceneHeading);
        assert_eq!(classify_line("CUT TO:"), ElementType::Transition);
        assert_eq!(classify_line("(whispering)"), ElementType::Parenthetical);
        assert_eq!(classify_line("JOHN"), ElementType::Character);
        assert_eq!(classify_line("He sits down."), ElementType::Action);
    }

    #[test]
    fn classify_with_context_resolves_dialogue() {
        assert_eq!(
            classify_with_context("Hello there!", true),
            ElementType::Dialogue
        );
        assert_eq!(
            classify_with_context("Hello there!", false),
            ElementType::Action
        );
        // A cue inside a dialogue block is still a cue
        assert_eq!(classify_with_context("SARAH", true), ElementType::Character);
    }
}
