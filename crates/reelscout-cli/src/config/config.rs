//! `AppConfig` struct and TOML loading.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reelscout_api::tmdb::{DEFAULT_LANGUAGE, DEFAULT_TIMEOUT};
use reelscout_search::InputOptions;
use reelscout_search::pagination::DEFAULT_LOAD_MORE_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB request settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Search screen settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// TMDB request configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// Language for person search (e.g. `en-US`).
    pub language: String,
    /// Include adult profiles in person search.
    pub include_adult: bool,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: String::from(DEFAULT_LANGUAGE),
            include_adult: false,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Search screen configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Rows from the end of the list at which the next page is requested.
    pub load_more_threshold: usize,
    /// Quiet period in milliseconds before typed text is processed.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            load_more_threshold: DEFAULT_LOAD_MORE_THRESHOLD,
            debounce_ms: 300,
        }
    }
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

    /// TMDB request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.tmdb.timeout_secs)
    }

    /// Input screen options derived from both sections.
    #[must_use]
    pub fn input_options(&self) -> InputOptions {
        InputOptions {
            debounce: Duration::from_millis(self.search.debounce_ms),
            language: self.tmdb.language.clone(),
            include_adult: self.tmdb.include_adult,
        }
    }
}
