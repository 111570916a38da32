//! Configuration management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default Perplexity chat-completions endpoint
pub const DEFAULT_API_URL: &str = "https://api.perplexity.ai/chat/completions";

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API credential is missing; the server must not start without it.
    #[error("{API_KEY_ENV} environment variable is not set; set your Perplexity API key to run this server")]
    MissingApiKey,

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Perplexity API key. Read from the environment; never written to disk.
    #[serde(skip_serializing, default = "api_key_from_env")]
    pub api_key: Option<String>,

    /// Upstream endpoint URL (override for testing or proxying)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: api_key_from_env(),
            api_url: default_api_url(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl Config {
    /// Return the API key, or the fatal startup error when it is absent.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

/// Per-call timeout settings, in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Timeout for full search and analysis tools
    #[serde(default = "default_search_secs")]
    pub search_secs: u64,

    /// Timeout for the quick search tool
    #[serde(default = "default_quick_secs")]
    pub quick_secs: u64,

    /// TCP connect timeout
    #[serde(default = "default_connect_secs")]
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            search_secs: default_search_secs(),
            quick_secs: default_quick_secs(),
            connect_secs: default_connect_secs(),
        }
    }
}

fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV).ok()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_search_secs() -> u64 {
    30
}

fn default_quick_secs() -> u64 {
    15
}

fn default_connect_secs() -> u64 {
    10
}

/// Load configuration from a file, with `SONAR_MCP_*` environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("SONAR_MCP").separator("__"))
        .build()?;

    let mut cfg: Config = settings.try_deserialize()?;
    // The credential always comes from the environment, never the file.
    cfg.api_key = api_key_from_env();
    Ok(cfg)
}

/// Look for a `sonar-mcp.toml` in the working directory
pub fn find_config_file() -> Option<PathBuf> {
    let candidate = PathBuf::from("sonar-mcp.toml");
    candidate.is_file().then_some(candidate)
}

/// Get the default configuration (from env vars or defaults)
pub fn get_config() -> Config {
    Config::default()
}
