/// Enrichment response validation and the fill-only-missing merge.
///
/// The validator turns an arbitrary external JSON string into typed
/// profiles, dropping anything malformed; the merger layers a profile
/// onto an existing character without ever overwriting a populated
/// field. One bad LLM turn must never abort the surrounding loop, so
/// the public validator fails soft: it logs and returns an empty list.

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::schema::character::Character;

#[derive(Debug, Error)]
enum EnrichmentError {
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not an object")]
    NotAnObject,
    #[error("`characters` is missing or not an array")]
    CharactersNotArray,
}

/// A validated, normalized enrichment profile for one character.
/// Transient — consumed by the merger and discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichedCharacterProfile {
    /// Trimmed, uppercased.
    pub name: String,
    pub description: Option<String>,
    pub age: Option<String>,
    pub occupation: Option<String>,
    pub physical_appearance: Option<String>,
    pub personality: Option<String>,
    pub goals: Option<String>,
    pub fears: Option<String>,
    pub backstory: Option<String>,
    pub arc: Option<String>,
    pub notes: Option<String>,
    /// Other-character-name (uppercased) → relationship description.
    pub relationships: HashMap<String, String>,
}

/// Parse and sanitize an external enrichment payload.
///
/// Expected shape: `{ "characters": [ { "name": ..., ... } ] }`.
/// On any parse error or structural mismatch this logs and returns an
/// empty list. Individual malformed entries are skipped without
/// invalidating the rest of the batch.
pub fn parse_enrichment_response(raw: &str) -> Vec<EnrichedCharacterProfile> {
    match try_parse(raw) {
        Ok(profiles) => profiles,
        Err(e) => {
            tracing::warn!(error = %e, "discarding unusable enrichment response");
            Vec::new()
        }
    }
}

fn try_parse(raw: &str) -> Result<Vec<EnrichedCharacterProfile>, EnrichmentError> {
    let value: Value = serde_json::from_str(raw)?;
    let root = value.as_object().ok_or(EnrichmentError::NotAnObject)?;
    let entries = root
        .get("characters")
        .and_then(Value::as_array)
        .ok_or(EnrichmentError::CharactersNotArray)?;

    let mut profiles = Vec::new();
    for entry in entries {
        match parse_profile(entry) {
            Some(profile) => profiles.push(profile),
            None => tracing::warn!("skipping malformed enrichment entry"),
        }
    }
    Ok(profiles)
}

fn parse_profile(entry: &Value) -> Option<EnrichedCharacterProfile> {
    let obj = entry.as_object()?;
    let name = obj.get("name")?.as_str()?.trim().to_uppercase();
    if name.is_empty() {
        return None;
    }

    let mut profile = EnrichedCharacterProfile {
        name,
        description: clean_string(obj.get("description")),
        age: clean_string(obj.get("age")),
        occupation: clean_string(obj.get("occupation")),
        physical_appearance: clean_string(obj.get("physicalAppearance")),
        personality: clean_string(obj.get("personality")),
        goals: clean_string(obj.get("goals")),
        fears: clean_string(obj.get("fears")),
        backstory: clean_string(obj.get("backstory")),
        arc: clean_string(obj.get("arc")),
        notes: clean_string(obj.get("notes")),
        ..EnrichedCharacterProfile::default()
    };

    // Relationships must be a plain object; anything else is dropped.
    if let Some(Value::Object(map)) = obj.get("relationships") {
        for (other_name, value) in map {
            if let Some(text) = value.as_str() {
                let text = text.trim();
                let key = other_name.trim().to_uppercase();
                if !text.is_empty() && !key.is_empty() {
                    profile.relationships.insert(key, text.to_string());
                }
            }
        }
    }

    Some(profile)
}

/// A recognized field value: a non-empty string after trimming.
fn clean_string(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// The shared emptiness definition for scalar fields and relationship
/// entries: absent, or all-whitespace.
pub fn is_field_empty(field: Option<&str>) -> bool {
    match field {
        None => true,
        Some(s) => s.trim().is_empty(),
    }
}

/// Map each character's uppercased name to its stable id, for
/// relationship target resolution.
pub fn name_id_map(characters: &[Character]) -> HashMap<String, String> {
    characters
        .iter()
        .map(|c| (c.name.trim().to_uppercase(), c.id.clone()))
        .collect()
}

/// Merge a validated profile into a character, fill-only-missing.
///
/// Returns a fresh record; the input is never mutated. A field is
/// written only when the existing value is empty. Relationship targets
/// are resolved by name through `id_by_name`; unresolvable names are
/// skipped, and an existing non-empty relationship entry is kept.
pub fn merge_profile(
    character: &Character,
    profile: &EnrichedCharacterProfile,
    id_by_name: &HashMap<String, String>,
) -> Character {
    let mut merged = character.clone();

    fill(&mut merged.description, &profile.description);
    fill(&mut merged.age, &profile.age);
    fill(&mut merged.occupation, &profile.occupation);
    fill(&mut merged.physical_appearance, &profile.physical_appearance);
    fill(&mut merged.personality, &profile.personality);
    fill(&mut merged.goals, &profile.goals);
    fill(&mut merged.fears, &profile.fears);
    fill(&mut merged.backstory, &profile.backstory);
    fill(&mut merged.arc, &profile.arc);
    fill(&mut merged.notes, &profile.notes);

    for (other_name, text) in &profile.relationships {
        let Some(id) = id_by_name.get(other_name) else {
            continue;
        };
        if is_field_empty(merged.relationships.get(id).map(String::as_str)) {
            merged.relationships.insert(id.clone(), text.clone());
        }
    }

    merged
}

fn fill(existing: &mut Option<String>, candidate: &Option<String>) {
    if is_field_empty(existing.as_deref()) {
        if let Some(value) = candidate {
            *existing = Some(value.clone());
        }
    }
}

/// Merge each profile into its matching character (by uppercased name)
/// and return only the characters that actually changed, in input
/// order. Callers use this to avoid no-op persistence writes.
pub fn apply_enrichments(
    characters: &[Character],
    profiles: &[EnrichedCharacterProfile],
) -> Vec<Character> {
    let id_by_name = name_id_map(characters);
    let by_name: HashMap<&str, &EnrichedCharacterProfile> =
        profiles.iter().map(|p| (p.name.as_str(), p)).collect();

    let mut updated = Vec::new();
    for character in characters {
        let key = character.name.trim().to_uppercase();
        let Some(&profile) = by_name.get(key.as_str()) else {
            continue;
        };
        let merged = merge_profile(character, profile, &id_by_name);
        if merged != *character {
            updated.push(merged);
        }
    }
    updated
}
