//! Settings loading, validation, and management for Notewright.
//!
//! Loads settings from `~/.notewright/settings.toml` with environment
//! variable overrides. Everything is validated lazily at point of use —
//! a missing API key only matters once a remote provider is called.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which backend answers chat requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// A local command-line executable
    Local,
    /// The OpenAI chat completions API
    OpenAi,
    /// The Anthropic messages API
    Anthropic,
    /// Any OpenAI-compatible endpoint at a user-supplied URL
    Custom,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Local => "local",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Custom => "custom",
        };
        write!(f, "{s}")
    }
}

/// The root settings structure.
///
/// Maps directly to `~/.notewright/settings.toml`. Owned by the host;
/// read-only from the core's perspective.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Which provider handles chat requests
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,

    /// API key for remote providers
    #[serde(default)]
    pub api_key: String,

    /// Endpoint URL for the custom provider
    #[serde(default)]
    pub custom_api_url: String,

    /// Default system prompt
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Vault-relative directory containing skill definitions
    #[serde(default = "default_skills_dir")]
    pub skills_dir: String,

    /// Whether tool-server integration is enabled
    #[serde(default)]
    pub enable_tool_servers: bool,

    /// Tool server configurations (JSON text, parsed lazily)
    #[serde(default = "default_tool_servers")]
    pub tool_servers: String,

    /// Command invoked by the local provider
    #[serde(default = "default_local_command")]
    pub local_command: String,

    /// Model identifier sent to remote providers
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens per response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Response creativity (0.0–1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_provider() -> ProviderKind {
    ProviderKind::Local
}
fn default_system_prompt() -> String {
    "You are Notewright, an AI assistant integrated into your note vault. \
     You help users with their notes, code, and workflows. Be concise and helpful."
        .into()
}
fn default_skills_dir() -> String {
    ".notewright/skills".into()
}
fn default_tool_servers() -> String {
    "[]".into()
}
fn default_local_command() -> String {
    "opencode run".into()
}
fn default_model() -> String {
    "gpt-4-turbo".into()
}
fn default_max_tokens() -> u32 {
    4096
}
fn default_temperature() -> f32 {
    0.7
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.api_key.is_empty() {
            "None"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("Settings")
            .field("provider", &self.provider)
            .field("api_key", &key)
            .field("custom_api_url", &self.custom_api_url)
            .field("skills_dir", &self.skills_dir)
            .field("enable_tool_servers", &self.enable_tool_servers)
            .field("local_command", &self.local_command)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            custom_api_url: String::new(),
            system_prompt: default_system_prompt(),
            skills_dir: default_skills_dir(),
            enable_tool_servers: false,
            tool_servers: default_tool_servers(),
            local_command: default_local_command(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl Settings {
    /// Load settings from the default path (~/.notewright/settings.toml).
    ///
    /// Environment variable overrides:
    /// - `NOTEWRIGHT_API_KEY` / `OPENAI_API_KEY` / `ANTHROPIC_API_KEY`
    /// - `NOTEWRIGHT_PROVIDER`
    /// - `NOTEWRIGHT_MODEL`
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_dir().join("settings.toml");
        let mut settings = Self::load_from(&path)?;

        if settings.api_key.is_empty() {
            if let Some(key) = std::env::var("NOTEWRIGHT_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            {
                settings.api_key = key;
            }
        }

        if let Ok(provider) = std::env::var("NOTEWRIGHT_PROVIDER") {
            match provider.as_str() {
                "local" => settings.provider = ProviderKind::Local,
                "openai" => settings.provider = ProviderKind::OpenAi,
                "anthropic" => settings.provider = ProviderKind::Anthropic,
                "custom" => settings.provider = ProviderKind::Custom,
                other => tracing::warn!(provider = %other, "Unknown provider override, keeping configured value"),
            }
        }

        if let Ok(model) = std::env::var("NOTEWRIGHT_MODEL") {
            settings.model = model;
        }

        Ok(settings)
    }

    /// Load settings from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No settings file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".notewright")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 1.0".into(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Check if an API key is available (from settings or environment).
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse settings file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Settings validation failed: {0}")]
    ValidationError(String),
}
