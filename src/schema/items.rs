//! Scored items and ordinal answer maps.

use super::TraitId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Enumerated answer text → value on the 1–5 scale.
pub type OrdinalMap = BTreeMap<String, u8>;

/// Weighting for one scored survey field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemWeightSpec {
    /// Response field this item reads.
    pub field: String,
    /// Positive weight per trait the item feeds. Traits not listed get nothing.
    pub weights: BTreeMap<TraitId, f64>,
    /// A high raw answer lowers the weighted traits.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reversed: bool,
    /// Traits that keep forward scoring on a reversed item.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub exempt: BTreeSet<TraitId>,
}

impl ItemWeightSpec {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            weights: BTreeMap::new(),
            reversed: false,
            exempt: BTreeSet::new(),
        }
    }

    pub fn weight(mut self, trait_id: TraitId, weight: f64) -> Self {
        self.weights.insert(trait_id, weight);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub fn exempting(mut self, trait_id: TraitId) -> Self {
        self.exempt.insert(trait_id);
        self
    }

    /// Sign applied to the centred answer for `trait_id`: `-1.0` when the
    /// item is reversed and the trait is not exempt, `1.0` otherwise.
    pub fn direction(&self, trait_id: TraitId) -> f64 {
        if self.reversed && !self.exempt.contains(&trait_id) {
            -1.0
        } else {
            1.0
        }
    }

    /// Weights that actually contribute (positive and finite), in trait order.
    pub fn active_weights(&self) -> impl Iterator<Item = (TraitId, f64)> + '_ {
        self.weights
            .iter()
            .map(|(&id, &w)| (id, w))
            .filter(|(_, w)| w.is_finite() && *w > 0.0)
    }
}

/// PANAS-style affect scale: two lists of item fields summed separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectScale {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}
