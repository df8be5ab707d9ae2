//! Insight text assembled from trait templates.

use super::classify::by_score;
use crate::schema::{ScoringSchema, TraitId, TraitVector};
use serde::Serialize;

/// Narrative output for one respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightBundle {
    /// Sentences for the two strongest traits.
    pub primary: String,
    /// Encouraging note on the weakest trait.
    pub growth_edge: String,
    /// Remark relating a score to the archetype. Empty when nothing applies.
    pub curiosity: String,
}

fn fill(template: &str, title: &str, score: u8) -> String {
    template
        .replace("{title}", title)
        .replace("{score}", &score.to_string())
}

pub fn compose(scores: &TraitVector, archetype_key: &str, schema: &ScoringSchema) -> InsightBundle {
    let rules = &schema.thresholds.insight;
    let ranked = by_score(scores);
    let (first, second) = (ranked[0], ranked[1]);
    let last = ranked[TraitId::COUNT - 1];

    let sentence = |id: TraitId, threshold: u8| {
        let profile = schema.traits.get(id);
        if scores[id] >= threshold {
            profile.high.as_str()
        } else {
            profile.low.as_str()
        }
    };
    let primary = [
        sentence(first, rules.primary_high),
        sentence(second, rules.secondary_high),
    ]
    .join(" ");

    let growth_edge = schema.traits.get(last).low.clone();

    let templates = &schema.curiosity;
    let archetype = schema
        .archetype(archetype_key)
        .or_else(|| schema.archetype(&schema.default_archetype));
    let curiosity = match archetype {
        Some(a) if a.leads_with(TraitId::SocialInitiative) => {
            let si = scores[TraitId::SocialInitiative];
            let template = if si >= rules.initiative_high {
                &templates.initiative_high
            } else {
                &templates.initiative_typical
            };
            fill(template, &a.title, si)
        }
        _ => {
            let er = scores[TraitId::EmotionalRegulation];
            let template = if er >= rules.regulation_high {
                &templates.regulation_high
            } else {
                &templates.regulation_low
            };
            let title = archetype.map(|a| a.title.as_str()).unwrap_or_default();
            fill(template, title, er)
        }
    };

    InsightBundle {
        primary,
        growth_edge,
        curiosity,
    }
}
