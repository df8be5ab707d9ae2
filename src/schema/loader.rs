//! Schema loading from JSON files.

use super::{ScoringSchema, SchemaError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default location of a user-supplied schema, relative to the project root.
pub const SCHEMA_FILE: &str = "config/schema.json";

/// Walks up from the executable looking for the directory that holds
/// `Cargo.toml`, and joins `rel_path` onto it. Falls back to `rel_path`.
pub fn resolve_project_path(rel_path: &str) -> PathBuf {
    let Ok(exe_path) = std::env::current_exe() else {
        return PathBuf::from(rel_path);
    };
    let mut current = exe_path.as_path();

    while let Some(parent) = current.parent() {
        if parent.join("Cargo.toml").exists() {
            return parent.join(rel_path);
        }
        current = parent;
    }

    PathBuf::from(rel_path)
}

/// Loads and validates scoring schemas.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Load the schema at `path`, or the built-in one when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<ScoringSchema, SchemaError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                debug!("using built-in scoring schema");
                Ok(ScoringSchema::builtin().clone())
            }
        }
    }

    /// Load the project's `config/schema.json` if it exists next to the
    /// build, else the built-in schema.
    pub fn load_project_default() -> Result<ScoringSchema, SchemaError> {
        let path = resolve_project_path(SCHEMA_FILE);
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            Self::load(None)
        }
    }

    /// Load a schema from a JSON file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<ScoringSchema, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::load_from_str(&content)?;

        info!(
            path = %path.display(),
            items = schema.items.len(),
            archetypes = schema.archetypes.len(),
            "loaded scoring schema"
        );
        Ok(schema)
    }

    /// Parse and validate a schema from JSON text.
    pub fn load_from_str(content: &str) -> Result<ScoringSchema, SchemaError> {
        let schema: ScoringSchema = serde_json::from_str(content)?;
        schema.validate()?;
        Ok(schema)
    }
}
