//! Configuration loading and validation for Troupe.
//!
//! Loads configuration from `~/.troupe/config.toml` with environment
//! variable overrides. Missing file means defaults; a present but
//! malformed file is an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The root configuration structure.
///
/// Maps directly to `~/.troupe/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the model endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature (the classifier and loop both want 0.0)
    #[serde(default)]
    pub temperature: f32,

    /// Maximum ReAct iterations per request
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Path of the customer ledger file
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Directory where generated music files land
    #[serde(default = "default_music_dir")]
    pub music_dir: String,

    /// URL of the remote music-synthesis endpoint
    #[serde(default = "default_synth_url")]
    pub synth_url: String,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_max_iterations() -> u32 {
    10
}
fn default_store_path() -> String {
    "customer_database.json".into()
}
fn default_music_dir() -> String {
    "generated_music".into()
}
fn default_synth_url() -> String {
    "http://localhost:7860/synthesize".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: 0.0,
            max_iterations: default_max_iterations(),
            store_path: default_store_path(),
            music_dir: default_music_dir(),
            synth_url: default_synth_url(),
        }
    }
}

/// Redact the secret in Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_iterations", &self.max_iterations)
            .field("store_path", &self.store_path)
            .field("music_dir", &self.music_dir)
            .field("synth_url", &self.synth_url)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load from the default location with env-var overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.api_key.is_none() {
            config.api_key = std::env::var("TROUPE_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("TROUPE_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load from a specific path. Missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }
        Ok(())
    }

    /// Config directory: `~/.troupe`
    pub fn config_dir() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".troupe")
    }
}
