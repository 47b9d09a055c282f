//! Backend configuration
//!
//! The orchestrator forwards this block without interpreting it; every
//! tunable the backend needs is explicit here, including the timeout and
//! keep-alive behavior that would otherwise have to be patched into the
//! HTTP layer globally.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama model tag
pub const DEFAULT_MODEL_ID: &str = "gemma3";

/// Default Ollama API endpoint
pub const DEFAULT_MODEL_URL: &str = "http://localhost:11434";

/// Configuration for the extraction backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Model identifier (e.g. "gemma3", "gemma3:1b")
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Model server endpoint
    #[serde(default = "default_model_url")]
    pub model_url: String,

    /// Maximum time for a single model call (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long the server keeps the model loaded after a call (seconds).
    /// Zero unloads after each call to avoid memory pressure on small hosts.
    #[serde(default)]
    pub keep_alive_secs: u64,

    /// Skip chunks whose response fails to parse instead of failing the run
    #[serde(default = "default_true")]
    pub suppress_parse_errors: bool,

    /// Ask the model to wrap its output in a markdown code fence
    #[serde(default)]
    pub fence_output: bool,

    /// Number of extraction passes over the document
    #[serde(default = "default_extraction_passes")]
    pub extraction_passes: u32,

    /// Maximum concurrent model calls within a pass
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Maximum characters per document chunk
    #[serde(default = "default_max_char_buffer")]
    pub max_char_buffer: usize,
}

impl BackendConfig {
    /// Get the per-call timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model_id.is_empty() {
            return Err("model_id must not be empty".to_string());
        }
        if self.model_url.is_empty() {
            return Err("model_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.extraction_passes == 0 {
            return Err("extraction_passes must be greater than 0".to_string());
        }
        if self.max_workers == 0 {
            return Err("max_workers must be greater than 0".to_string());
        }
        if self.max_char_buffer == 0 {
            return Err("max_char_buffer must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            model_url: default_model_url(),
            timeout_secs: default_timeout_secs(),
            keep_alive_secs: 0,
            suppress_parse_errors: true,
            fence_output: false,
            extraction_passes: default_extraction_passes(),
            max_workers: default_max_workers(),
            max_char_buffer: default_max_char_buffer(),
        }
    }
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

fn default_model_url() -> String {
    DEFAULT_MODEL_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_true() -> bool {
    true
}

fn default_extraction_passes() -> u32 {
    2
}

fn default_max_workers() -> usize {
    8
}

fn default_max_char_buffer() -> usize {
    1200
}
