//! Application configuration
//!
//! An optional `tarot.toml` can override the recommender tuning and draw
//! defaults. A missing file simply means defaults; a present but malformed
//! file is an error, so typos do not silently fall back.
//!
//! ```toml
//! [recommender]
//! min_score = 0.05
//! max_results = 3
//!
//! [draw]
//! reversed = true
//! ```

use crate::recommend::RecommenderConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub recommender: RecommenderConfig,
    pub draw: DrawConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Whether readings include reversed cards by default
    pub reversed: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self { reversed: true }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        config
            .recommender
            .validate()
            .with_context(|| format!("invalid recommender settings in {}", path.display()))?;
        Ok(config)
    }
}
