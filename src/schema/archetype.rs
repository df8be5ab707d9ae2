//! Archetype Registry - Identity Labels and the Pair Table
//!
//! Archetypes are declarative display records selected by the classifier.
//! Each one names the trait pair it typically dominates; the pair table maps
//! ordered (primary, secondary) pairs to archetype keys.

use super::TraitId;
use serde::{Deserialize, Serialize};

/// Display record for one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub title: String,
    pub tagline: String,
    /// Glyph shown next to the title.
    pub symbol: String,
    /// Visual accent (a CSS gradient in the shipped schema).
    pub accent: String,
    /// Writing tone key consumed by presentation layers.
    pub tone: String,
    /// Traits this archetype usually leads with. Empty for the default.
    #[serde(default)]
    pub typical_pair: Vec<TraitId>,
}

impl Archetype {
    pub fn leads_with(&self, trait_id: TraitId) -> bool {
        self.typical_pair.contains(&trait_id)
    }
}

/// One row of the pair table. Order matters: `[primary, secondary]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairRule {
    pub pair: [TraitId; 2],
    pub archetype: String,
}

impl PairRule {
    pub fn new(primary: TraitId, secondary: TraitId, archetype: impl Into<String>) -> Self {
        Self {
            pair: [primary, secondary],
            archetype: archetype.into(),
        }
    }

    pub fn matches(&self, primary: TraitId, secondary: TraitId) -> bool {
        self.pair == [primary, secondary]
    }
}
