//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Remote model selection.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Default values used when CLI flags are absent.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Hugging Face token (captioning and speech synthesis).
    pub huggingface: Option<String>,
    /// Gemini API key (story generation).
    pub gemini: Option<String>,
}

/// Model names (full identifiers or short aliases).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Image captioning model.
    pub caption: String,
    /// Story generation model.
    pub story: String,
    /// Speech synthesis model.
    pub speech: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self { caption: "blip".to_string(), story: "flash".to_string(), speech: "vits".to_string() }
    }
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Directory receiving narration files.
    pub output_dir: String,
    /// Per-request timeout for every remote call, in seconds.
    pub timeout_secs: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { output_dir: "audio-img".to_string(), timeout_secs: 30 }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Hugging Face token, preferring environment variable.
    #[must_use]
    pub fn huggingface_key(&self) -> Option<String> {
        std::env::var("HUGGINGFACE_API_KEY").ok().or_else(|| self.keys.huggingface.clone())
    }

    /// Get the Gemini API key, preferring environment variable.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY").ok().or_else(|| self.keys.gemini.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `IMAGETALE_CONFIG` environment variable
/// 3. `~/.config/imagetale/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("IMAGETALE_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/imagetale/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/imagetale/config.toml")
    } else {
        PathBuf::from("imagetale.toml")
    }
}
