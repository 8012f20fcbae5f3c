/// Scene segmentation — folding classified lines into ordered scenes.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::classifier::{
    canonical_speaker_name, classify_with_context, strip_forced_marker, ElementType,
};
use crate::core::tokens::tokenize;
use crate::schema::scene::Scene;

/// The structural model of one parsed document: title-page metadata and
/// the ordered scene list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Screenplay {
    pub title: Option<String>,
    pub author: Option<String>,
    pub scenes: Vec<Scene>,
}

/// In-progress scene state while folding over lines.
struct OpenScene {
    heading: String,
    start_line: usize,
    characters: Vec<String>,
    content: Vec<String>,
}

impl OpenScene {
    fn close(self, number: u32, end_line: usize) -> Scene {
        let (location, time_of_day) = Scene::parse_heading(&self.heading);
        Scene {
            id: format!("scene-{}", number),
            number,
            heading: self.heading,
            location,
            time_of_day,
            characters: self.characters,
            start_line: self.start_line,
            end_line,
            content: self.content.join("\n"),
        }
    }
}

/// Parse Fountain text into a `Screenplay`.
///
/// Every line between a scene heading and the next (the heading itself
/// included) lands verbatim in that scene's content. Character cues add
/// the canonical speaker name to the open scene's set, in order of
/// first appearance. Text with no headings yields an empty scene list.
pub fn parse_screenplay(text: &str) -> Screenplay {
    let mut screenplay = Screenplay::default();
    let mut open: Option<OpenScene> = None;
    let mut last_line = 0usize;
    let mut in_dialogue = false;

    for (idx, raw) in text.lines().enumerate() {
        last_line = idx;
        let trimmed = raw.trim();

        // Title-page metadata only counts before the first heading.
        if open.is_none() {
            if let Some(value) = strip_key(trimmed, "Title:") {
                screenplay.title = Some(value);
                continue;
            }
            if let Some(value) = strip_key(trimmed, "Author:") {
                screenplay.author = Some(value);
                continue;
            }
        }

        if trimmed.is_empty() {
            in_dialogue = false;
            if let Some(scene) = open.as_mut() {
                scene.content.push(raw.to_string());
            }
            continue;
        }

        let kind = classify_with_context(trimmed, in_dialogue);
        in_dialogue = matches!(
            kind,
            ElementType::Character | ElementType::Parenthetical | ElementType::Dialogue
        );

        match kind {
            ElementType::SceneHeading => {
                if let Some(scene) = open.take() {
                    let number = screenplay.scenes.len() as u32 + 1;
                    screenplay.scenes.push(scene.close(number, idx - 1));
                }
                open = Some(OpenScene {
                    heading: strip_forced_marker(trimmed).0.to_string(),
                    start_line: idx,
                    characters: Vec::new(),
                    content: vec![raw.to_string()],
                });
            }
            ElementType::Character => {
                if let Some(scene) = open.as_mut() {
                    let name = canonical_speaker_name(trimmed);
                    if !scene.characters.contains(&name) {
                        scene.characters.push(name);
                    }
                    scene.content.push(raw.to_string());
                }
            }
            _ => {
                if let Some(scene) = open.as_mut() {
                    scene.content.push(raw.to_string());
                }
            }
        }
    }

    if let Some(scene) = open.take() {
        let number = screenplay.scenes.len() as u32 + 1;
        screenplay.scenes.push(scene.close(number, last_line));
    }

    screenplay
}

/// Derive the set of speaking character names from the document's own
/// cue tokens, in order of first appearance.
pub fn detect_character_names(text: &str) -> Vec<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut names = Vec::new();
    for token in tokenize(text) {
        if token.kind == ElementType::Character {
            let name = canonical_speaker_name(&token.text);
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    names
}

fn strip_key(line: &str, key: &str) -> Option<String> {
    line.strip_prefix(key).map(|v| v.trim().to_string())
}
