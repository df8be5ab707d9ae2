//! Scoring Schema - the declarative configuration model
//!
//! Everything the engine needs to know about a survey lives here as plain
//! data: trait labels and insight templates, ordinal answer maps, item
//! weights with reversal rules, the archetype registry with its pair table,
//! and the numeric thresholds. Swapping the schema changes the scoring
//! without touching any engine code.

pub mod archetype;
pub mod error;
pub mod items;
pub mod loader;
pub mod traits;

pub use archetype::{Archetype, PairRule};
pub use error::SchemaError;
pub use items::{AffectScale, ItemWeightSpec, OrdinalMap};
pub use loader::SchemaLoader;
pub use traits::{TraitId, TraitMap, TraitVector};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;
use tracing::warn;

const BUILTIN_SCHEMA: &str = include_str!("../../config/schema.json");

static BUILTIN: LazyLock<ScoringSchema> = LazyLock::new(|| {
    SchemaLoader::load_from_str(BUILTIN_SCHEMA).expect("embedded config/schema.json is valid")
});

/// Labels and insight sentences for one trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    pub label: String,
    pub description: String,
    /// Insight shown when the trait scores high.
    pub high: String,
    /// Insight shown when the trait scores low. Also used as the growth edge.
    pub low: String,
}

/// A [`TraitProfile`] for every trait. Deserialization fails if any is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<TraitId, TraitProfile>",
    into = "BTreeMap<TraitId, TraitProfile>"
)]
pub struct TraitTable(TraitMap<TraitProfile>);

impl TraitTable {
    pub fn get(&self, id: TraitId) -> &TraitProfile {
        &self.0[id]
    }
}

impl TryFrom<BTreeMap<TraitId, TraitProfile>> for TraitTable {
    type Error = SchemaError;

    fn try_from(mut entries: BTreeMap<TraitId, TraitProfile>) -> Result<Self, Self::Error> {
        if let Some(missing) = TraitId::ALL.into_iter().find(|id| !entries.contains_key(id)) {
            return Err(SchemaError::MissingTrait(missing));
        }
        Ok(Self(TraitMap::from_fn(|id| {
            entries.remove(&id).unwrap_or_else(|| unreachable!("checked above"))
        })))
    }
}

impl From<TraitTable> for BTreeMap<TraitId, TraitProfile> {
    fn from(table: TraitTable) -> Self {
        table.0.iter().map(|(id, p)| (id, p.clone())).collect()
    }
}

/// Curiosity remarks. `{title}` and `{score}` are substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuriosityTemplates {
    /// Social Initiative at or above the affirming threshold.
    pub initiative_high: String,
    /// Social Initiative below it.
    pub initiative_typical: String,
    /// Emotional Regulation at or above its threshold.
    pub regulation_high: String,
    /// Emotional Regulation below it.
    pub regulation_low: String,
}

/// Classifier fallback rule. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    /// Below this max-minus-min spread the profile is undifferentiated.
    pub min_spread: u8,
    /// Open interval (midband_low, midband_high) for the top score...
    pub midband_low: u8,
    pub midband_high: u8,
    /// ...inside which the spread must reach this value.
    pub midband_min_spread: u8,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            min_spread: 15,
            midband_low: 40,
            midband_high: 60,
            midband_min_spread: 25,
        }
    }
}

/// Score cut-offs for the insight composer. The top and second thresholds
/// differ on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightRules {
    pub primary_high: u8,
    pub secondary_high: u8,
    pub initiative_high: u8,
    pub regulation_high: u8,
}

impl Default for InsightRules {
    fn default() -> Self {
        Self {
            primary_high: 60,
            secondary_high: 55,
            initiative_high: 65,
            regulation_high: 60,
        }
    }
}

/// Suspect-submission heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityRules {
    pub min_completion_seconds: f64,
    pub min_answered_fraction: f64,
}

impl Default for QualityRules {
    fn default() -> Self {
        Self {
            min_completion_seconds: 30.0,
            min_answered_fraction: 0.60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub classifier: ClassifierRules,
    pub insight: InsightRules,
    pub quality: QualityRules,
}

/// The complete scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSchema {
    pub traits: TraitTable,
    #[serde(default)]
    pub ordinal_maps: BTreeMap<String, OrdinalMap>,
    /// Scored items, processed in this order.
    pub items: Vec<ItemWeightSpec>,
    pub archetypes: BTreeMap<String, Archetype>,
    pub default_archetype: String,
    #[serde(default)]
    pub pairs: Vec<PairRule>,
    pub curiosity: CuriosityTemplates,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affect: Option<AffectScale>,
}

impl ScoringSchema {
    /// The schema shipped in `config/schema.json`, parsed once per process.
    pub fn builtin() -> &'static ScoringSchema {
        &BUILTIN
    }

    pub fn item(&self, field: &str) -> Option<&ItemWeightSpec> {
        self.items.iter().find(|item| item.field == field)
    }

    pub fn ordinal_map(&self, field: &str) -> Option<&OrdinalMap> {
        self.ordinal_maps.get(field)
    }

    pub fn archetype(&self, key: &str) -> Option<&Archetype> {
        self.archetypes.get(key)
    }

    /// First pair-table entry for the ordered pair, if any.
    pub fn archetype_for_pair(&self, primary: TraitId, secondary: TraitId) -> Option<&str> {
        self.pairs
            .iter()
            .find(|rule| rule.matches(primary, secondary))
            .map(|rule| rule.archetype.as_str())
    }

    /// Bound each trait would reach if every item were answered.
    pub fn theoretical_ranges(&self) -> TraitMap<f64> {
        let mut bounds = TraitMap::splat(0.0);
        for item in &self.items {
            for (id, weight) in item.active_weights() {
                bounds[id] += weight * 2.0;
            }
        }
        bounds
    }

    /// Structural checks. A trait that no item weights is allowed (it always
    /// scores the midpoint) but logged.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.field.as_str()) {
                return Err(SchemaError::DuplicateItem {
                    field: item.field.clone(),
                });
            }
            if item.weights.is_empty() {
                warn!(field = %item.field, "item weights no trait; it only counts toward completeness");
            }
            for (&trait_id, &weight) in &item.weights {
                if !weight.is_finite() || weight <= 0.0 {
                    return Err(SchemaError::InvalidWeight {
                        field: item.field.clone(),
                        trait_id,
                        weight,
                    });
                }
            }
            for &trait_id in &item.exempt {
                if !item.reversed {
                    return Err(SchemaError::ExemptionWithoutReversal {
                        field: item.field.clone(),
                        trait_id,
                    });
                }
                if !item.weights.contains_key(&trait_id) {
                    warn!(field = %item.field, %trait_id, "exemption names a trait the item does not weight");
                }
            }
        }

        for (field, map) in &self.ordinal_maps {
            if let Some((label, &value)) = map.iter().find(|(_, v)| !(1..=5).contains(*v)) {
                return Err(SchemaError::OrdinalOutOfRange {
                    field: field.clone(),
                    label: label.clone(),
                    value,
                });
            }
        }

        if !self.archetypes.contains_key(&self.default_archetype) {
            return Err(SchemaError::MissingDefaultArchetype(
                self.default_archetype.clone(),
            ));
        }
        for rule in &self.pairs {
            let [primary, secondary] = rule.pair;
            if primary == secondary {
                warn!(trait_id = %primary, archetype = %rule.archetype, "pair repeats one trait and can never match");
            }
            if !self.archetypes.contains_key(&rule.archetype) {
                return Err(SchemaError::UnknownPairArchetype {
                    primary,
                    secondary,
                    archetype: rule.archetype.clone(),
                });
            }
        }

        self.validate_thresholds()?;

        for (id, bound) in self.theoretical_ranges().iter() {
            if *bound == 0.0 {
                warn!(trait_id = %id, "no scored item weights this trait; it will always score 50");
            }
        }
        Ok(())
    }

    fn validate_thresholds(&self) -> Result<(), SchemaError> {
        let classifier = &self.thresholds.classifier;
        if classifier.midband_low >= classifier.midband_high {
            return Err(SchemaError::InvalidThreshold(format!(
                "classifier midband ({}, {}) is empty",
                classifier.midband_low, classifier.midband_high
            )));
        }
        let quality = &self.thresholds.quality;
        if !(0.0..=1.0).contains(&quality.min_answered_fraction) {
            return Err(SchemaError::InvalidThreshold(format!(
                "min_answered_fraction {} is outside 0-1",
                quality.min_answered_fraction
            )));
        }
        if !quality.min_completion_seconds.is_finite() || quality.min_completion_seconds < 0.0 {
            return Err(SchemaError::InvalidThreshold(format!(
                "min_completion_seconds {} must be a non-negative number",
                quality.min_completion_seconds
            )));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schema_is_valid() {
        let schema = ScoringSchema::builtin();
        schema.validate().unwrap();
        assert_eq!(schema.items.len(), 36);
        assert_eq!(schema.default_archetype, "balanced_navigator");
        assert_eq!(schema.archetypes.len(), 10);
        assert_eq!(schema.pairs.len(), 26);
    }

    #[test]
    fn test_builtin_pair_lookup_is_ordered() {
        let schema = ScoringSchema::builtin();
        assert_eq!(
            schema.archetype_for_pair(TraitId::CognitiveReflection, TraitId::EmotionalRegulation),
            Some("inner_architect")
        );
        assert_eq!(
            schema.archetype_for_pair(TraitId::SocialInitiative, TraitId::SelfInsight),
            None
        );
    }

    #[test]
    fn test_builtin_exemptions() {
        let schema = ScoringSchema::builtin();
        let overthinking = schema.item("overthinking").unwrap();
        assert!(overthinking.reversed);
        assert_eq!(overthinking.direction(TraitId::CognitiveReflection), 1.0);
        assert_eq!(overthinking.direction(TraitId::EmotionalRegulation), -1.0);
    }

    #[test]
    fn test_theoretical_ranges() {
        let schema = fixtures::schema(vec![
            ItemWeightSpec::new("a").weight(TraitId::SelfInsight, 1.0),
            ItemWeightSpec::new("b")
                .weight(TraitId::SelfInsight, 0.5)
                .weight(TraitId::GoalPersistence, 0.25),
        ]);
        let ranges = schema.theoretical_ranges();
        assert_eq!(ranges[TraitId::SelfInsight], 3.0);
        assert_eq!(ranges[TraitId::GoalPersistence], 0.5);
        assert_eq!(ranges[TraitId::ExploratoryDrive], 0.0);
    }

    #[test]
    fn test_validate_rejects_duplicate_item() {
        let schema = fixtures::schema(vec![
            ItemWeightSpec::new("a").weight(TraitId::SelfInsight, 1.0),
            ItemWeightSpec::new("a").weight(TraitId::SelfInsight, 1.0),
        ]);
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::DuplicateItem { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_weight() {
        let schema = fixtures::schema(vec![
            ItemWeightSpec::new("a").weight(TraitId::SelfInsight, -0.5)
        ]);
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_validate_tolerates_harmless_oddities() {
        let mut schema = fixtures::schema(vec![
            ItemWeightSpec::new("unweighted"),
            ItemWeightSpec::new("b")
                .weight(TraitId::SelfInsight, 1.0)
                .reversed()
                .exempting(TraitId::GoalPersistence),
        ]);
        schema.pairs.push(PairRule::new(
            TraitId::GoalPersistence,
            TraitId::GoalPersistence,
            "initiator",
        ));
        schema.validate().unwrap();
        assert_eq!(schema.item("b").unwrap().direction(TraitId::SelfInsight), -1.0);
    }

    #[test]
    fn test_validate_rejects_exemption_on_forward_item() {
        let schema = fixtures::schema(vec![ItemWeightSpec::new("a")
            .weight(TraitId::SelfInsight, 1.0)
            .exempting(TraitId::SelfInsight)]);
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::ExemptionWithoutReversal { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_pair_archetype() {
        let mut schema = fixtures::schema(vec![]);
        schema.pairs.push(PairRule::new(
            TraitId::GoalPersistence,
            TraitId::SelfInsight,
            "nobody",
        ));
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::UnknownPairArchetype { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_missing_default() {
        let mut schema = fixtures::schema(vec![]);
        schema.default_archetype = "gone".to_string();
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::MissingDefaultArchetype(_))
        ));
    }

    #[test]
    fn test_validate_rejects_ordinal_out_of_range() {
        let mut schema = fixtures::schema(vec![]);
        schema
            .ordinal_maps
            .insert("freq".to_string(), OrdinalMap::from([("Always".to_string(), 6)]));
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::OrdinalOutOfRange { value: 6, .. })
        ));
    }

    #[test]
    fn test_trait_table_requires_every_trait() {
        let mut entries: BTreeMap<TraitId, TraitProfile> = TraitId::ALL
            .into_iter()
            .map(|id| (id, fixtures::profile(id)))
            .collect();
        entries.remove(&TraitId::ExploratoryDrive);
        assert!(matches!(
            TraitTable::try_from(entries),
            Err(SchemaError::MissingTrait(TraitId::ExploratoryDrive))
        ));
    }
}
