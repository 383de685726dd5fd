//! Shell configuration parsing
//!
//! The config file is read-only ambient configuration (greeting name, media
//! source, timer intervals); no user action is ever written back to it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigParseError {
    #[error("File IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// Tunable shell settings. Every field has a production default; a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Name shown in the header greeting
    pub greeting_name: String,

    /// Fixed identifier of the media source the hidden player loads
    pub media_source_id: String,

    /// Clock refresh interval
    pub clock_tick_ms: u64,

    /// Wait before the first media-channel acquisition attempt
    pub settle_delay_ms: u64,

    /// How long the overlay's thinking indicator stays lit
    pub thinking_window_ms: u64,

    /// How often the overlay caption rotates
    pub caption_interval_ms: u64,

    /// Delay between command-bar blur and the dropdown closing
    pub blur_grace_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            greeting_name: "Mark".to_string(),
            media_source_id: "jfKfPfyJRdk".to_string(),
            clock_tick_ms: 1000,
            settle_delay_ms: 1000,
            thinking_window_ms: 3000,
            caption_interval_ms: 7500,
            blur_grace_ms: 200,
        }
    }
}

/// Versioned on-disk config layout
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub shell: ShellConfig,
}

/// Default location: `<config dir>/homeshell/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("homeshell").join("config.toml"))
}

pub struct ConfigParser;

impl ConfigParser {
    pub fn new() -> Self {
        ConfigParser
    }

    /// Parse and validate a config file from disk
    pub fn parse_shell_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<ShellConfig, ConfigParseError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_shell_toml(&content)
    }

    /// Parse and validate config from TOML text
    pub fn parse_shell_toml(&self, content: &str) -> Result<ShellConfig, ConfigParseError> {
        let config_file: ConfigFile = toml::from_str(content)?;
        self.validate(&config_file.shell)?;
        Ok(config_file.shell)
    }

    fn validate(&self, config: &ShellConfig) -> Result<(), ConfigParseError> {
        if config.greeting_name.is_empty() {
            return Err(ConfigParseError::ValidationError {
                message: "Greeting name cannot be empty".to_string(),
            });
        }

        if config.greeting_name.len() > 100 {
            return Err(ConfigParseError::ValidationError {
                message: format!(
                    "Greeting name too long: {} (max 100 chars)",
                    config.greeting_name
                ),
            });
        }

        if config.media_source_id.is_empty()
            || !config
                .media_source_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigParseError::ValidationError {
                message: format!("Invalid media source id: {}", config.media_source_id),
            });
        }

        let intervals = [
            ("clock_tick_ms", config.clock_tick_ms),
            ("settle_delay_ms", config.settle_delay_ms),
            ("thinking_window_ms", config.thinking_window_ms),
            ("caption_interval_ms", config.caption_interval_ms),
            ("blur_grace_ms", config.blur_grace_ms),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(ConfigParseError::ValidationError {
                    message: format!("{name} must be positive"),
                });
            }
        }

        Ok(())
    }
}

impl Default for ConfigParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let parser = ConfigParser::new();
        let file = ConfigFile {
            version: "1".to_string(),
            shell: ShellConfig::default(),
        };
        let content = toml::to_string(&file).unwrap();
        let parsed = parser.parse_shell_toml(&content).unwrap();
        assert_eq!(parsed, ShellConfig::default());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let parser = ConfigParser::new();
        let content = r#"
            version = "1"

            [shell]
            greeting_name = "Ada"
        "#;
        let parsed = parser.parse_shell_toml(content).unwrap();
        assert_eq!(parsed.greeting_name, "Ada");
        assert_eq!(parsed.caption_interval_ms, 7500);
    }

    #[test]
    fn empty_greeting_is_rejected() {
        let parser = ConfigParser::new();
        let content = r#"
            version = "1"

            [shell]
            greeting_name = ""
        "#;
        assert!(matches!(
            parser.parse_shell_toml(content),
            Err(ConfigParseError::ValidationError { .. })
        ));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let parser = ConfigParser::new();
        let content = r#"
            version = "1"

            [shell]
            blur_grace_ms = 0
        "#;
        assert!(matches!(
            parser.parse_shell_toml(content),
            Err(ConfigParseError::ValidationError { .. })
        ));
    }

    #[test]
    fn malformed_media_id_is_rejected() {
        let parser = ConfigParser::new();
        let content = r#"
            version = "1"

            [shell]
            media_source_id = "not a video id!"
        "#;
        assert!(matches!(
            parser.parse_shell_toml(content),
            Err(ConfigParseError::ValidationError { .. })
        ));
    }
}
