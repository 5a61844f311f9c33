use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Name of the source language embedded in the instruction prompt
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Name of the target language embedded in the instruction prompt
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Directory watched and scanned for input documents
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    /// Directory translated artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Path of the persisted translation cache file
    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// Accepted document file extension (without dot)
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Legacy encoding used when input bytes are not valid UTF-8
    #[serde(default = "default_fallback_encoding")]
    pub fallback_encoding: String,

    /// Backend (Ollama) configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Fixed delay in milliseconds between consecutive unit submissions
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend (Ollama) configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name (e.g., "qwen2.5")
    #[serde(default = "default_model")]
    pub model: String,

    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Lower values make output more deterministic
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens the backend may generate per unit
    #[serde(default = "default_num_predict")]
    pub num_predict: u32,

    /// Instruction template embedding the unit text
    /// Placeholders: {source_language}, {target_language}, {text}
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            num_predict: default_num_predict(),
            prompt_template: default_prompt_template(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "Thai".to_string()
}

fn default_target_language() -> String {
    "Chinese".to_string()
}

fn default_input_dir() -> String {
    "input_docs".to_string()
}

fn default_output_dir() -> String {
    "output_docs".to_string()
}

fn default_cache_file() -> String {
    ".translation_cache/translation_cache.json".to_string()
}

fn default_file_extension() -> String {
    "txt".to_string()
}

fn default_fallback_encoding() -> String {
    // Legacy single-byte Thai encoding, the common non-UTF-8 case
    "windows-874".to_string()
}

fn default_pacing_delay_ms() -> u64 {
    500 // 500ms default delay between unit submissions
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "qwen2.5".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_num_predict() -> u32 {
    2048 // Generous bound, long paragraphs must fit in one response
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_prompt_template() -> String {
    "Translate the following text from {source_language} to {target_language}. \
     Return only the translated text, with no explanation and no {source_language} \
     or English content:\n\n{text}"
        .to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("Source language must not be empty"));
        }
        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language must not be empty"));
        }
        if self.input_dir.trim().is_empty() || self.output_dir.trim().is_empty() {
            return Err(anyhow!("Input and output directories must not be empty"));
        }
        if self.file_extension.trim().is_empty() {
            return Err(anyhow!("Document file extension must not be empty"));
        }
        if self.backend.endpoint.trim().is_empty() {
            return Err(anyhow!("Backend endpoint must not be empty"));
        }
        let endpoint = if self.backend.endpoint.contains("://") {
            self.backend.endpoint.clone()
        } else {
            format!("http://{}", self.backend.endpoint)
        };
        Url::parse(&endpoint).context(format!(
            "Failed to parse backend endpoint URL: {}",
            self.backend.endpoint
        ))?;
        if self.backend.model.trim().is_empty() {
            return Err(anyhow!("Backend model must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.backend.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 1.0, got {}",
                self.backend.temperature
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            cache_file: default_cache_file(),
            file_extension: default_file_extension(),
            fallback_encoding: default_fallback_encoding(),
            backend: BackendConfig::default(),
            pacing_delay_ms: default_pacing_delay_ms(),
            log_level: LogLevel::default(),
        }
    }
}
