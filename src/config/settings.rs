//! Application settings management

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{MtgmapError, Result};

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whisper transcription settings
    #[serde(default)]
    pub whisper: WhisperSettings,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Minutes output settings
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperSettings {
    /// Whisper model to use (tiny, base, small, medium, medium-q8_0, large)
    #[serde(default = "default_model")]
    pub model: String,

    /// Path to model files directory
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Language for transcription (empty = auto-detect)
    #[serde(default = "default_language")]
    pub language: String,

    /// Number of threads for inference (0 = auto)
    #[serde(default)]
    pub threads: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (openai)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (for cloud providers)
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (for custom/compatible providers)
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Directory where generated minutes are written
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Character budget for the transcript preview returned by the pipeline
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "mtgmap", "mtgmap")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/mtgmap"))
}

fn default_models_dir() -> PathBuf {
    let mut dir = default_data_dir();
    dir.push("models");
    dir
}

fn default_model() -> String {
    "medium-q8_0".to_string()
}

fn default_language() -> String {
    "ja".to_string()
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_llm_model() -> String {
    "gpt-5-mini".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/outputs")
}

fn default_preview_chars() -> usize {
    800
}

impl Default for WhisperSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            models_dir: default_models_dir(),
            language: default_language(),
            threads: 0,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            whisper: WhisperSettings::default(),
            llm: LlmSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            MtgmapError::Config(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let mut settings: Settings = toml::from_str(&content).map_err(|e| {
            MtgmapError::Config(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    ///
    /// `OPENAI_API_KEY` fills the key only when the config left it empty;
    /// `OPENAI_MODEL` wins over the configured model when set.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                if !key.trim().is_empty() {
                    self.llm.api_key = key;
                }
            }
        }

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            if !model.trim().is_empty() {
                self.llm.model = model;
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "mtgmap", "mtgmap")
            .ok_or_else(|| MtgmapError::Config("Could not determine config directory".into()))?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)
            .map_err(|e| MtgmapError::Config(format!("Failed to serialize settings: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MtgmapError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        std::fs::write(path, content).map_err(|e| {
            MtgmapError::Config(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// Get the path to the configured whisper model file
    pub fn model_path(&self) -> PathBuf {
        self.whisper
            .models_dir
            .join(format!("ggml-{}.bin", self.whisper.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_values() {
        let settings = Settings::default();
        assert_eq!(settings.llm.provider, "openai");
        assert_eq!(settings.llm.model, "gpt-5-mini");
        assert_eq!(settings.whisper.model, "medium-q8_0");
        assert_eq!(settings.whisper.language, "ja");
        assert_eq!(settings.output.dir, PathBuf::from("data/outputs"));
        assert_eq!(settings.output.preview_chars, 800);
    }

    #[test]
    fn partial_config_fills_missing_sections() {
        let settings: Settings = toml::from_str(
            r#"
            [llm]
            api_key = "sk-test"

            [output]
            preview_chars = 500
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(settings.llm.api_key, "sk-test");
        assert_eq!(settings.llm.model, "gpt-5-mini");
        assert_eq!(settings.output.preview_chars, 500);
        assert_eq!(settings.whisper.language, "ja");
    }

    #[test]
    fn model_path_uses_ggml_naming() {
        let mut settings = Settings::default();
        settings.whisper.model = "base".to_string();
        settings.whisper.models_dir = PathBuf::from("/tmp/models");

        assert_eq!(
            settings.model_path(),
            PathBuf::from("/tmp/models/ggml-base.bin")
        );
    }
}
