//! Configuration types for the turntable controller.
//!
//! This module defines the configuration schema: where the turntable
//! service lives, which preset table to use, the dispatcher triggers, and
//! runtime settings for requests and the editor.

use crate::presets::{resolve_trigger, PresetError, PresetRevision, PresetTable, Trigger};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "TURNTABLE_BASE_URL";

/// Main configuration for the turntable controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the turntable service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Built-in preset table revision.
    #[serde(default)]
    pub revision: PresetRevision,

    /// Presets added to or replacing entries of the built-in table.
    #[serde(default)]
    pub presets: PresetTable,

    /// Dispatcher triggers, in display order.
    #[serde(default = "Trigger::defaults")]
    pub triggers: Vec<Trigger>,

    /// Seconds between health probes (0 = probe once on start).
    #[serde(default = "default_health_refresh_secs")]
    pub health_refresh_secs: u64,

    /// Request timeout in seconds. Unset leaves the transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Whether triggers may overlap while a request is outstanding.
    #[serde(default)]
    pub admission: Admission,

    /// Document the editor starts with.
    #[serde(default = "default_editor_initial")]
    pub editor_initial: serde_json::Value,

    /// Directory for log files. TUI sessions only log when this is set.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_health_refresh_secs() -> u64 {
    30
}

fn default_editor_initial() -> serde_json::Value {
    serde_json::json!({
        "name": "turntable",
        "rotate": 90
    })
}

/// Admission policy for repeated activations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Admission {
    /// Every activation starts a new request; the last to resolve is shown.
    #[default]
    Overlap,
    /// Activations are refused while any request is outstanding.
    Exclusive,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, falling back to defaults if the file is missing.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Apply `TURNTABLE_BASE_URL` if set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => self.with_base_url(url),
            _ => self,
        }
    }

    /// Replace the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The effective preset table: the chosen revision plus overrides.
    pub fn preset_table(&self) -> PresetTable {
        let mut table = PresetTable::for_revision(self.revision);
        for (name, timeline) in self.presets.iter() {
            table.insert(name, timeline.clone());
        }
        table
    }

    /// Check that every trigger points at an existing preset.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let table = self.preset_table();
        for trigger in &self.triggers {
            resolve_trigger(&table, trigger)?;
        }
        Ok(())
    }

    /// Health refresh interval, if periodic refresh is enabled.
    pub fn health_refresh(&self) -> Option<std::time::Duration> {
        (self.health_refresh_secs > 0)
            .then(|| std::time::Duration::from_secs(self.health_refresh_secs))
    }

    /// The editor's initial buffer text.
    pub fn editor_initial_text(&self) -> String {
        serde_json::to_string_pretty(&self.editor_initial).unwrap_or_else(|_| "{}".into())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            revision: PresetRevision::default(),
            presets: PresetTable::new(),
            triggers: Trigger::defaults(),
            health_refresh_secs: default_health_refresh_secs(),
            request_timeout_secs: None,
            admission: Admission::default(),
            editor_initial: default_editor_initial(),
            log_dir: None,
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A trigger names a preset that does not exist.
    #[error("Invalid trigger: {0}")]
    Preset(#[from] PresetError),
}
