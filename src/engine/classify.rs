//! Top-two dominance classification.

use crate::schema::{ScoringSchema, TraitId, TraitVector};
use std::cmp::Reverse;
use tracing::debug;

/// Traits by descending score. Equal scores order by trait code, so `CR`
/// outranks `ED` which outranks `ER` and so on.
pub fn rank(scores: &TraitVector) -> [TraitId; TraitId::COUNT] {
    let mut ranked = TraitId::ALL;
    ranked.sort_by_key(|&id| (Reverse(scores[id]), id.code()));
    ranked
}

/// Traits by descending score; equal scores keep canonical order. Used for
/// display and insight text, where no tie-break is applied.
pub fn by_score(scores: &TraitVector) -> [TraitId; TraitId::COUNT] {
    let mut ranked = TraitId::ALL;
    ranked.sort_by_key(|&id| Reverse(scores[id]));
    ranked
}

/// Archetype key for a score vector.
///
/// Undifferentiated profiles (small spread, or a middling top score without
/// a clear gap) and unmapped pairs resolve to the schema's default.
pub fn classify(scores: &TraitVector, schema: &ScoringSchema) -> String {
    let rules = &schema.thresholds.classifier;
    let ranked = rank(scores);
    let top = scores[ranked[0]];
    let bottom = scores[ranked[TraitId::COUNT - 1]];
    let spread = top - bottom;

    let flat = spread < rules.min_spread;
    let midband =
        rules.midband_low < top && top < rules.midband_high && spread < rules.midband_min_spread;
    if flat || midband {
        debug!(top, spread, "profile undifferentiated, using default archetype");
        return schema.default_archetype.clone();
    }

    let (primary, secondary) = (ranked[0], ranked[1]);
    match schema.archetype_for_pair(primary, secondary) {
        Some(key) if schema.archetype(key).is_some() => key.to_string(),
        _ => {
            debug!(%primary, %secondary, "no archetype for pair, using default");
            schema.default_archetype.clone()
        }
    }
}
