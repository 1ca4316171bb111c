//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, default model, and an
//! optional override for the LLM API base URL. The provider credential is
//! deliberately NOT part of the file; it is read from the process
//! environment at first extractor construction.

use serde::Deserialize;
use std::path::Path;
use stencil_extractor::DEFAULT_MODEL;
use thiserror::Error;

/// Environment variable holding the LLM provider credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// Model used when a request does not name one
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Override for the LLM API base URL (local gateways)
    #[serde(default)]
    pub api_base_url: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            default_model: DEFAULT_MODEL.to_string(),
            api_base_url: None,
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
