//! Configuration management for gqltest.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `gqltest.toml` file
//! 3. User config `~/.config/gqltest/config.toml`
//! 4. Built-in defaults (lowest priority)
//!
//! Command-line flags are applied on top by the CLI.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GraphQL client configuration.
    pub client: ClientConfig,

    /// Test runner configuration.
    pub runner: RunnerConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./gqltest.toml` (project local)
    /// 2. `~/.config/gqltest/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        // Try project-local config first
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(DEFAULT_CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Use defaults
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("GQLTEST_ENDPOINT") {
            self.client.endpoint = Some(endpoint);
        }
        if let Ok(secs) = std::env::var("GQLTEST_TIMEOUT_SECS") {
            if let Ok(n) = secs.parse() {
                self.client.timeout_secs = n;
            }
        }
        if let Ok(header) = std::env::var("GQLTEST_ACCOUNT_HEADER") {
            self.client.account_header = header;
        }
    }
}

/// GraphQL client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Endpoint URL. Usually supplied via `--endpoint`.
    pub endpoint: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Header name carrying the per-suite account id.
    pub account_header: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            account_header: DEFAULT_ACCOUNT_HEADER.to_string(),
        }
    }
}

/// Test runner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Print response diffs for failing tests.
    pub verbose: bool,

    /// Stop execution on the first failing test.
    pub fail_fast: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.client.endpoint.is_none());
        assert_eq!(config.client.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.client.account_header, DEFAULT_ACCOUNT_HEADER);
        assert!(!config.runner.fail_fast);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[client]"));
        assert!(toml_str.contains("[runner]"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[client]
endpoint = "http://localhost:8080/graphql"
timeout_secs = 5

[runner]
fail_fast = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.client.endpoint.as_deref(),
            Some("http://localhost:8080/graphql")
        );
        assert_eq!(config.client.timeout_secs, 5);
        assert!(config.runner.fail_fast);
        assert!(!config.runner.verbose);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[runner]\nverbose = true\n").unwrap();
        assert!(config.runner.verbose);
        assert_eq!(config.client.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
