//! Trait aggregation: weighted, centred item contributions → 0–100 scores.

use super::resolve::resolve;
use crate::response::ResponseSet;
use crate::schema::{ScoringSchema, TraitId, TraitMap, TraitVector};
use serde::Serialize;

/// Neutral midpoint of a scale point (1–5).
const SCALE_MIDPOINT: f64 = 3.0;
/// Largest distance a centred answer can sit from the midpoint.
const MAX_CENTRED: f64 = 2.0;
/// Score for a trait with no signal.
pub const NEUTRAL_SCORE: u8 = 50;

/// Symmetric extremes the raw total could have reached.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TraitRange {
    pub min: f64,
    pub max: f64,
}

impl TraitRange {
    pub fn symmetric(bound: f64) -> Self {
        Self {
            min: -bound,
            max: bound,
        }
    }

    /// Position of `raw` inside the range on a 0–100 scale.
    pub fn normalize(&self, raw: f64) -> u8 {
        if self.max == self.min {
            return NEUTRAL_SCORE;
        }
        let norm = (raw - self.min) / (self.max - self.min);
        (norm * 100.0).clamp(0.0, 100.0).round() as u8
    }
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub scores: TraitVector,
    pub raw: TraitMap<f64>,
    pub ranges: TraitMap<TraitRange>,
}

/// Fold every answered scored item into per-trait totals and normalize.
///
/// An unanswered item contributes neither to the raw total nor to the range,
/// so a partial submission is scored on what was actually answered.
pub fn aggregate(responses: &ResponseSet, schema: &ScoringSchema) -> Aggregate {
    let mut raw = TraitMap::splat(0.0_f64);
    let mut bounds = TraitMap::splat(0.0_f64);

    for item in &schema.items {
        let Some(value) = resolve(&item.field, responses, schema) else {
            continue;
        };
        let centred = f64::from(value) - SCALE_MIDPOINT;

        for (trait_id, weight) in item.active_weights() {
            raw[trait_id] += item.direction(trait_id) * centred * weight;
            bounds[trait_id] += weight * MAX_CENTRED;
        }
    }

    let ranges = bounds.map(|_, bound| TraitRange::symmetric(*bound));
    let scores = TraitMap::from_fn(|id: TraitId| ranges[id].normalize(raw[id]));

    Aggregate {
        scores,
        raw,
        ranges,
    }
}
