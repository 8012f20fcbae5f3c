use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A character record, the unit the enrichment merge operates on.
///
/// `name` is the canonical uppercase cue form. Fields are either
/// user-authored (protected) or AI-filled — the merge in
/// `core::enrichment` only ever writes a field that is currently empty.
/// Name uniqueness (case-insensitive) is enforced by callers, not here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub physical_appearance: Option<String>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub fears: Option<String>,
    #[serde(default)]
    pub backstory: Option<String>,
    #[serde(default)]
    pub arc: Option<String>,
    /// Free-text description keyed by the other character's id.
    #[serde(default)]
    pub relationships: HashMap<String, String>,
    #[serde(default)]
    pub custom_attributes: HashMap<String, String>,
    /// Ids of scenes this character appears in.
    #[serde(default)]
    pub appearances: FxHashSet<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Character {
    /// Create a bare record with the name canonicalized to uppercase.
    pub fn new(id: impl Into<String>, name: &str) -> Self {
        Character {
            id: id.into(),
            name: name.trim().to_uppercase(),
            ..Character::default()
        }
    }
}
