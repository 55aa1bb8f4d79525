//! Client configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable overriding the server URL.
pub const SERVER_URL_ENV: &str = "TICTACTOE_SERVER_URL";

/// Configuration for the online client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Websocket URL of the matchmaking server.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Display name; prompted for when absent.
    #[serde(default)]
    player_name: Option<String>,

    /// File that receives logs while the terminal UI is up.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_server_url() -> String {
    "ws://localhost:8000".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("online_tictactoe.log")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            player_name: None,
            log_file: default_log_file(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves configuration: defaults, then the optional file, then the
    /// environment.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            debug!(%url, "Server URL taken from environment");
            config.server_url = url;
        }
        Ok(config)
    }

    /// Overrides the server URL.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Overrides the player name.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url(), "ws://localhost:8000");
        assert_eq!(config.player_name(), &None);
    }

    #[test]
    fn test_from_file_fills_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "player_name = \"alice\"").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.player_name().as_deref(), Some("alice"));
        assert_eq!(config.server_url(), "ws://localhost:8000");
        assert_eq!(config.log_file(), &PathBuf::from("online_tictactoe.log"));
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server_url = ").unwrap();

        let err = ClientConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ClientConfig::from_file("/nonexistent/online_tictactoe.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::default()
            .with_server_url("ws://example.test:9000")
            .with_player_name("bob");
        assert_eq!(config.server_url(), "ws://example.test:9000");
        assert_eq!(config.player_name().as_deref(), Some("bob"));
    }
}
