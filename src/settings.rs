//! Runtime settings for the `sociotype` binary.
//!
//! Read from TOML. Every field has a default, so a partial file is fine and
//! no file at all means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up relative to the working directory when `--config` is not given.
pub const SETTINGS_FILE: &str = "config/sociotype.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scoring schema JSON. `None` uses the project's config/schema.json when
    /// present, else the built-in schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Batch worker threads, passed to `Engine::run_batch` as is.
    pub workers: usize,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_path: None,
            pretty: false,
            workers: 0,
            log_filter: "sociotype=info".to_string(),
        }
    }
}

impl Settings {
    /// Load from `path`, which must exist, or from [`SETTINGS_FILE`] if it
    /// exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None if Path::new(SETTINGS_FILE).exists() => Self::load_from_path(SETTINGS_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write the default settings to `path`, creating parent directories.
    pub fn write_default(path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let settings = Settings::default();
        let content = toml::to_string_pretty(&settings)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            anyhow::bail!("log_filter must not be empty");
        }
        if let Some(path) = &self.schema_path {
            if path.as_os_str().is_empty() {
                anyhow::bail!("schema_path is set but empty");
            }
        }
        Ok(())
    }
}
