//! Tool Configuration
//!
//! Handles parsing and management of strbridge.toml configuration files used
//! by the companion CLI. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::bytes::Encoding;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Conversion policy applied when input is ill-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Substitute U+FFFD and keep going.
    #[default]
    Lenient,
    /// Fail on the first ill-formed sequence.
    Strict,
}

/// Root configuration structure matching strbridge.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BridgeConfig {
    /// Transcoding defaults
    #[serde(default)]
    pub transcode: TranscodeConfig,
}

/// Defaults for the `transcode` subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscodeConfig {
    /// Target encoding when `--to` is not given
    #[serde(default = "default_target")]
    pub target: Encoding,

    /// Ill-formed input handling
    #[serde(default)]
    pub policy: Policy,

    /// Emit a byte-order mark on output
    #[serde(default)]
    pub write_bom: bool,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            policy: Policy::default(),
            write_bom: false,
        }
    }
}

fn default_target() -> Encoding {
    Encoding::Utf8
}

impl BridgeConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BridgeConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find and load configuration by searching up from the given directory.
    /// Falls back to defaults when no strbridge.toml exists.
    pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let config_path = dir.join("strbridge.toml");
            if config_path.exists() {
                return Self::load(&config_path);
            }
            if !dir.pop() {
                return Ok(Self::default());
            }
        }
    }

    /// Load configuration from the current directory or parents.
    pub fn load_from_cwd() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(ConfigError::Io)?;
        Self::find_and_load(&cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.transcode.target, Encoding::Utf8);
        assert_eq!(config.transcode.policy, Policy::Lenient);
        assert!(!config.transcode.write_bom);
    }

    #[test]
    fn test_parse_full_config() {
        let config: BridgeConfig = toml::from_str(
            r#"
            [transcode]
            target = "utf-16le"
            policy = "strict"
            write_bom = true
            "#,
        )
        .unwrap();
        assert_eq!(config.transcode.target, Encoding::Utf16Le);
        assert_eq!(config.transcode.policy, Policy::Strict);
        assert!(config.transcode.write_bom);
    }

    #[test]
    fn test_partial_sections_fall_back() {
        let config: BridgeConfig = toml::from_str("[transcode]\npolicy = \"strict\"\n").unwrap();
        assert_eq!(config.transcode.target, Encoding::Utf8);
        assert_eq!(config.transcode.policy, Policy::Strict);
    }
}
