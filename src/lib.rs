//! Screenplay Engine — Fountain screenplay parsing and character enrichment.
//!
//! Converts loosely-structured Fountain plain text into a reliable
//! structural model (scenes, speaking characters, dialogue) and safely
//! layers externally-generated enrichment onto that model without ever
//! overwriting human-authored data.

pub mod core;
pub mod schema;
