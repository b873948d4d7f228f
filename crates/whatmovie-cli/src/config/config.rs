//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use whatmovie_picker::FilterCriteria;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Backend proxy settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Startup filter settings.
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Backend proxy configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the backend proxy (e.g. `http://localhost:3000/`).
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Filter applied when the picker starts.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Criteria in textual form, e.g. `from=1990 to=1999 rating=7.5 genres=28,12`.
    #[serde(default)]
    pub criteria: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parses the startup filter. No configured filter means no criteria.
    ///
    /// # Errors
    ///
    /// Returns an error if `filter.criteria` is not valid criteria text.
    pub fn initial_criteria(&self) -> Result<FilterCriteria> {
        let Some(text) = self.filter.criteria.as_deref() else {
            return Ok(FilterCriteria::default());
        };
        text.parse()
            .with_context(|| format!("invalid filter.criteria in config: {text:?}"))
    }
}
