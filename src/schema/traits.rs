//! Trait identifiers and the fixed-size per-trait map.
//!
//! The seven traits are a closed set known at build time. Everything that
//! carries one value per trait (scores, raw totals, ranges) uses [`TraitMap`]
//! so that completeness is guaranteed by the type rather than checked at
//! runtime.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// One of the seven social-disposition dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitId {
    #[serde(rename = "ER")]
    EmotionalRegulation,
    #[serde(rename = "CR")]
    CognitiveReflection,
    #[serde(rename = "SI")]
    SocialInitiative,
    #[serde(rename = "PF")]
    PsychologicalFlexibility,
    #[serde(rename = "GP")]
    GoalPersistence,
    #[serde(rename = "SE")]
    SelfInsight,
    #[serde(rename = "ED")]
    ExploratoryDrive,
}

impl TraitId {
    pub const COUNT: usize = 7;

    /// Canonical order. Stable sorts start from this order.
    pub const ALL: [TraitId; TraitId::COUNT] = [
        TraitId::EmotionalRegulation,
        TraitId::CognitiveReflection,
        TraitId::SocialInitiative,
        TraitId::PsychologicalFlexibility,
        TraitId::GoalPersistence,
        TraitId::SelfInsight,
        TraitId::ExploratoryDrive,
    ];

    /// Two-letter code used in configuration and output.
    pub fn code(self) -> &'static str {
        match self {
            TraitId::EmotionalRegulation => "ER",
            TraitId::CognitiveReflection => "CR",
            TraitId::SocialInitiative => "SI",
            TraitId::PsychologicalFlexibility => "PF",
            TraitId::GoalPersistence => "GP",
            TraitId::SelfInsight => "SE",
            TraitId::ExploratoryDrive => "ED",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TraitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TraitId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitId::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown trait: {}", s))
    }
}

/// Exactly one `T` per trait, indexed by [`TraitId`].
///
/// Serializes as a JSON object keyed by trait code in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TraitMap<T>([T; TraitId::COUNT]);

impl<T> TraitMap<T> {
    pub fn from_fn(mut f: impl FnMut(TraitId) -> T) -> Self {
        Self(TraitId::ALL.map(&mut f))
    }

    pub fn get(&self, id: TraitId) -> &T {
        &self.0[id.index()]
    }

    /// `(trait, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (TraitId, &T)> {
        TraitId::ALL.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(TraitId, &T) -> U) -> TraitMap<U> {
        TraitMap::from_fn(|id| f(id, &self.0[id.index()]))
    }
}

impl<T: Clone> TraitMap<T> {
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T> Index<TraitId> for TraitMap<T> {
    type Output = T;

    fn index(&self, id: TraitId) -> &T {
        &self.0[id.index()]
    }
}

impl<T> IndexMut<TraitId> for TraitMap<T> {
    fn index_mut(&mut self, id: TraitId) -> &mut T {
        &mut self.0[id.index()]
    }
}

impl<T: Serialize> Serialize for TraitMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TraitId::COUNT))?;
        for (id, value) in self.iter() {
            map.serialize_entry(id.code(), value)?;
        }
        map.end()
    }
}

/// Trait scores on the 0–100 scale.
pub type TraitVector = TraitMap<u8>;
