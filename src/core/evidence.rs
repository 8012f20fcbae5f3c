/// Character evidence extraction — bounded, explainable signals about
/// each character, rebuilt on demand from a token stream.

use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::classifier::{canonical_speaker_name, ElementType};
use crate::core::tokens::FountainToken;

/// Action mention texts are truncated to this many characters.
const ACTION_MENTION_MAX_CHARS: usize = 200;

/// Default cap on characters included in a formatted prompt.
pub const DEFAULT_MAX_PROMPT_CHARACTERS: usize = 20;

/// Bounds on how much evidence is collected per character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvidenceLimits {
    pub max_dialogue_excerpts: usize,
    pub max_action_mentions: usize,
    /// Dialogue/parenthetical lines collected per excerpt.
    pub max_excerpt_lines: usize,
}

impl Default for EvidenceLimits {
    fn default() -> Self {
        Self {
            max_dialogue_excerpts: 5,
            max_action_mentions: 3,
            max_excerpt_lines: 4,
        }
    }
}

/// Evidence bundle for one character. Transient — never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterEvidence {
    pub name: String,
    /// `"NAME:\n<lines>"` samples, in document order.
    pub dialogue_excerpts: Vec<String>,
    /// Action lines mentioning the character, truncated.
    pub action_mentions: Vec<String>,
    /// Scenes shared with each other character, symmetric by construction.
    pub co_occurrences: HashMap<String, u32>,
    /// Approximate scene presence: max of excerpt count and the largest
    /// co-occurrence count. Deliberately not an exact distinct-scene
    /// count; kept for parity with prior behavior.
    pub scene_count: u32,
}

/// Extract per-character evidence from a token stream.
///
/// Known names are canonicalized to trimmed uppercase. A character joins
/// the current scene's set when they speak or when an action line
/// mentions them by word-boundary match; on every scene close, each
/// pair of distinct names in the set gets a co-occurrence increment in
/// both directions.
pub fn extract_evidence(
    tokens: &[FountainToken],
    known_names: &[String],
    limits: &EvidenceLimits,
) -> HashMap<String, CharacterEvidence> {
    let mut evidence: HashMap<String, CharacterEvidence> = HashMap::new();
    let mut matchers: Vec<(String, Regex)> = Vec::new();

    for raw_name in known_names {
        let name = raw_name.trim().to_uppercase();
        if name.is_empty() || evidence.contains_key(&name) {
            continue;
        }
        let pattern = format!(r"(?i)\b{}\b", regex::escape(&name));
        let re = Regex::new(&pattern).expect("valid escaped name regex");
        matchers.push((name.clone(), re));
        evidence.insert(
            name.clone(),
            CharacterEvidence {
                name,
                ..CharacterEvidence::default()
            },
        );
    }

    let mut scene_set: FxHashSet<String> = FxHashSet::default();

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            ElementType::SceneHeading => {
                finalize_scene(&mut evidence, &scene_set);
                scene_set.clear();
            }
            ElementType::Character => {
                let name = canonical_speaker_name(&token.text);
                let Some(entry) = evidence.get_mut(&name) else {
                    continue;
                };
                scene_set.insert(name.clone());
                if entry.dialogue_excerpts.len() < limits.max_dialogue_excerpts {
                    let lines = collect_excerpt_lines(&tokens[i + 1..], limits.max_excerpt_lines);
                    if !lines.is_empty() {
                        entry
                            .dialogue_excerpts
                            .push(format!("{}:\n{}", name, lines.join("\n")));
                    }
                }
            }
            ElementType::Action => {
                for (name, re) in &matchers {
                    if !re.is_match(&token.text) {
                        continue;
                    }
                    scene_set.insert(name.clone());
                    let Some(entry) = evidence.get_mut(name) else {
                        continue;
                    };
                    if entry.action_mentions.len() < limits.max_action_mentions {
                        entry.action_mentions.push(truncate_mention(&token.text));
                    }
                }
            }
            _ => {}
        }
    }
    finalize_scene(&mut evidence, &scene_set);

    for entry in evidence.values_mut() {
        let max_co = entry.co_occurrences.values().copied().max().unwrap_or(0);
        entry.scene_count = (entry.dialogue_excerpts.len() as u32).max(max_co);
    }

    evidence
}

/// Greedily collect dialogue lines directly under a cue. Parentheticals
/// render as `(text)`; anything else ends the excerpt.
fn collect_excerpt_lines(following: &[FountainToken], max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for token in following {
        if lines.len() >= max_lines {
            break;
        }
        match token.kind {
            ElementType::Dialogue => lines.push(token.text.clone()),
            ElementType::Parenthetical => lines.push(format!("({})", token.text)),
            _ => break,
        }
    }
    lines
}

fn finalize_scene(evidence: &mut HashMap<String, CharacterEvidence>, scene_set: &FxHashSet<String>) {
    for a in scene_set {
        for b in scene_set {
            if a == b {
                continue;
            }
            if let Some(entry) = evidence.get_mut(a) {
                *entry.co_occurrences.entry(b.clone()).or_insert(0) += 1;
            }
        }
    }
}

fn truncate_mention(text: &str) -> String {
    if text.chars().count() <= ACTION_MENTION_MAX_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(ACTION_MENTION_MAX_CHARS).collect();
    format!("{}...", truncated)
}

/// Render evidence bundles as prompt text.
///
/// Characters are ordered by excerpt count descending (name ascending
/// on ties, so output never depends on map iteration order) and capped
/// at `max_characters`. Each section lists dialogue samples, action
/// descriptions, and the top 5 co-occurring names by count.
pub fn format_all_evidence_for_prompt(
    evidence: &HashMap<String, CharacterEvidence>,
    max_characters: usize,
) -> String {
    let mut entries: Vec<&CharacterEvidence> = evidence.values().collect();
    entries.sort_by(|a, b| {
        b.dialogue_excerpts
            .len()
            .cmp(&a.dialogue_excerpts.len())
            .then_with(|| a.name.cmp(&b.name))
    });
    entries.truncate(max_characters);

    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("## {}\n", entry.name));

        if !entry.dialogue_excerpts.is_empty() {
            out.push_str("\nDialogue samples:\n");
            for excerpt in &entry.dialogue_excerpts {
                out.push_str(excerpt);
                out.push('\n');
            }
        }

        if !entry.action_mentions.is_empty() {
            out.push_str("\nAction descriptions:\n");
            for mention in &entry.action_mentions {
                out.push_str(&format!("- {}\n", mention));
            }
        }

        if !entry.co_occurrences.is_empty() {
            let mut pairs: Vec<(&String, &u32)> = entry.co_occurrences.iter().collect();
            pairs.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            let listed: Vec<String> = pairs
                .iter()
                .take(5)
                .map(|(name, count)| format!("{} ({})", name, count))
                .collect();
            out.push_str(&format!("\nFrequently appears with: {}\n", listed.join(", ")));
        }

        out.push('\n');
    }
    out
}
