//! Error types for loading and validating a scoring schema.

use super::TraitId;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a scoring schema cannot be used.
///
/// These only surface while loading configuration. Scoring itself never
/// fails once a schema has been accepted.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("trait {0} has no label/template entry")]
    MissingTrait(TraitId),

    #[error("item '{field}' is listed more than once")]
    DuplicateItem { field: String },

    #[error("item '{field}' has invalid weight {weight} for {trait_id}")]
    InvalidWeight {
        field: String,
        trait_id: TraitId,
        weight: f64,
    },

    #[error("item '{field}' exempts {trait_id} from reversal but is not reversed")]
    ExemptionWithoutReversal { field: String, trait_id: TraitId },

    #[error("ordinal map '{field}' maps '{label}' to {value}, expected 1-5")]
    OrdinalOutOfRange {
        field: String,
        label: String,
        value: u8,
    },

    #[error("default archetype '{0}' is not registered")]
    MissingDefaultArchetype(String),

    #[error("pair {primary}-{secondary} points at unknown archetype '{archetype}'")]
    UnknownPairArchetype {
        primary: TraitId,
        secondary: TraitId,
        archetype: String,
    },

    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),
}
