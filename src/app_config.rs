use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings. Per-request overrides
/// shadow the configured defaults without mutating them.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation backend configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Prompt template overrides (None = built-in defaults)
    #[serde(default)]
    pub prompts: PromptConfig,

    /// Credential-check service endpoint (empty = auditing disabled)
    #[serde(default)]
    pub auth_endpoint: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            prompts: PromptConfig::default(),
            auth_endpoint: String::new(),
            log_level: LogLevel::default(),
        }
    }
}

/// Translation backend configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Prompt template overrides for the two translation stages
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PromptConfig {
    /// Stage-1 (draft) system prompt template
    #[serde(default)]
    pub draft: Option<String>,

    /// Stage-2 (refine) system prompt template
    #[serde(default)]
    pub refine: Option<String>,
}

fn default_endpoint() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_model() -> String {
    "qwen2.5-14b-instruct".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Resolved per-request model configuration, defaults already shadowed
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub endpoint: String,
    /// API key for the service
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Per-request overrides carried alongside an upload.
///
/// Every field shadows the corresponding configured default when present.
#[derive(Debug, Clone, Default)]
pub struct RequestOverrides {
    /// Stage-1 (draft) prompt template override
    pub prompt_draft: Option<String>,
    /// Stage-2 (refine) prompt template override
    pub prompt_refine: Option<String>,
    /// Endpoint override
    pub endpoint: Option<String>,
    /// API key override
    pub api_key: Option<String>,
    /// Model override
    pub model: Option<String>,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load the configuration, creating a default config file if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            let config = Config::default();
            config.save(path)?;
            log::info!("Created default configuration at {}", path.display());
            Ok(config)
        }
    }

    /// Save the configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Resolve the model configuration for one request, applying overrides
    pub fn resolve_model(&self, overrides: &RequestOverrides) -> ModelConfig {
        ModelConfig {
            endpoint: overrides
                .endpoint
                .clone()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| self.api.endpoint.clone()),
            api_key: overrides
                .api_key
                .clone()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| self.api.api_key.clone()),
            model: overrides
                .model
                .clone()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| self.api.model.clone()),
            timeout_secs: self.api.timeout_secs,
        }
    }

    /// Resolve the (draft, refine) prompt templates for one request.
    ///
    /// Precedence: per-request override, then the configured template,
    /// then the built-in default (represented here as None).
    pub fn resolve_prompts(
        &self,
        overrides: &RequestOverrides,
    ) -> (Option<String>, Option<String>) {
        let draft = overrides
            .prompt_draft
            .clone()
            .or_else(|| self.prompts.draft.clone());
        let refine = overrides
            .prompt_refine
            .clone()
            .or_else(|| self.prompts.refine.clone());
        (draft, refine)
    }
}
