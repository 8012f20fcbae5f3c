/// Token stream adapter — flat typed tokens for evidence extraction.
///
/// Applies the same classification rules as `classifier`, but emits one
/// token per non-blank line instead of aggregating scenes. Evidence
/// extraction needs per-line token identity, not scene buffers.

use serde::{Deserialize, Serialize};

use crate::core::classifier::{classify_with_context, strip_forced_marker, ElementType};

/// One classified line of Fountain text, in document order.
///
/// `text` is the trimmed, cleaned form (forced-heading markers and
/// parenthetical wrappers stripped); `raw` is the original line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FountainToken {
    pub kind: ElementType,
    pub text: String,
    pub raw: String,
}

/// Tokenize Fountain text into a flat token stream.
///
/// Blank lines emit no token but close any open dialogue block, which
/// is how the dialogue/action ambiguity is resolved: a non-blank line
/// directly under a cue, parenthetical, or dialogue line is dialogue.
pub fn tokenize(text: &str) -> Vec<FountainToken> {
    let mut tokens = Vec::new();
    let mut in_dialogue = false;

    for raw in text.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            in_dialogue = false;
            continue;
        }

        let kind = classify_with_context(trimmed, in_dialogue);
        let cleaned = match kind {
            ElementType::SceneHeading => strip_forced_marker(trimmed).0.to_string(),
            ElementType::Parenthetical => trimmed
                .strip_prefix('(')
                .and_then(|s| s.strip_suffix(')'))
                .unwrap_or(trimmed)
                .trim()
                .to_string(),
            _ => trimmed.to_string(),
        };

        in_dialogue = matches!(
            kind,
            ElementType::Character | ElementType::Parenthetical | ElementType::Dialogue
        );

        tokens.push(FountainToken {
            kind,
            text: cleaned,
            raw: raw.to_string(),
        });
    }

    tokens
}
