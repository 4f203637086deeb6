//! Configuration management
//!
//! Optional TOML file, `cobs.toml` in the working directory unless a path is
//! given with `--config`. Command-line flags override file values.

use crate::app_error::{AppError, Result};
use cobs_codec::constants::MAX_FRAME_SIZE;
use cobs_codec::DecodePolicy;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cobs.toml";

// =============================================================================
// Formats
// =============================================================================

/// How input bytes are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Hex text, pairs optionally separated by whitespace
    #[default]
    Hex,
    /// Bytes as-is
    Raw,
}

/// How results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Space separated hex pairs
    #[default]
    Hex,
    /// Bytes as-is
    Raw,
    /// JSON report with status and hex data
    Json,
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub encode: EncodeConfig,
    pub decode: DecodeConfig,
    pub io: IoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Append the 0x00 frame delimiter
    pub delimiter: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// "strict" or "lenient"
    pub policy: DecodePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    /// Largest encoded frame accepted or produced
    pub max_frame_size: usize,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self { delimiter: true }
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_format: InputFormat::Hex,
            output_format: OutputFormat::Hex,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

impl Config {
    /// Reject values the codec cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.io.max_frame_size < 2 {
            return Err(AppError::ConfigValidation {
                field: "io.max_frame_size",
                reason: format!("must be at least 2, got {}", self.io.max_frame_size),
            });
        }
        Ok(())
    }
}

/// Parse config from TOML text
pub fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(|e| AppError::ConfigValidation {
        field: "config",
        reason: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Load config
///
/// An explicit path must exist and parse. The implicit `cobs.toml` is
/// optional: if missing or invalid, defaults are used.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Loaded config from {:?}", path);
        return parse(&content);
    }

    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }

    match fs::read_to_string(&path) {
        Ok(content) => match parse(&content) {
            Ok(config) => {
                debug!("Loaded config from {:?}", path);
                Ok(config)
            }
            Err(e) => {
                warn!("Config error in {:?}: {}, using defaults", path, e);
                Ok(Config::default())
            }
        },
        Err(e) => {
            warn!("Failed to read config {:?}: {}, using defaults", path, e);
            Ok(Config::default())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();

        assert!(config.encode.delimiter);
        assert_eq!(config.decode.policy, DecodePolicy::Strict);
        assert_eq!(config.io.input_format, InputFormat::Hex);
        assert_eq!(config.io.output_format, OutputFormat::Hex);
        assert_eq!(config.io.max_frame_size, MAX_FRAME_SIZE);
    }

    #[test]
    fn test_config_empty_file() {
        let config = parse("").unwrap();
        assert!(config.encode.delimiter);
        assert_eq!(config.io.max_frame_size, MAX_FRAME_SIZE);
    }

    #[test]
    fn test_config_partial_section() {
        let partial_toml = r#"
[decode]
policy = "lenient"

[io]
output_format = "json"
"#;

        let config = parse(partial_toml).unwrap();

        assert_eq!(config.decode.policy, DecodePolicy::Lenient);
        assert_eq!(config.io.output_format, OutputFormat::Json);
        // Rest should be defaults
        assert_eq!(config.io.input_format, InputFormat::Hex);
        assert!(config.encode.delimiter);
    }

    #[test]
    fn test_config_serialize_deserialize_roundtrip() {
        let config = Config {
            encode: EncodeConfig { delimiter: false },
            decode: DecodeConfig {
                policy: DecodePolicy::Lenient,
            },
            io: IoConfig {
                input_format: InputFormat::Raw,
                output_format: OutputFormat::Raw,
                max_frame_size: 512,
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored = parse(&toml_str).unwrap();

        assert!(!restored.encode.delimiter);
        assert_eq!(restored.decode.policy, DecodePolicy::Lenient);
        assert_eq!(restored.io.input_format, InputFormat::Raw);
        assert_eq!(restored.io.output_format, OutputFormat::Raw);
        assert_eq!(restored.io.max_frame_size, 512);
    }

    #[test]
    fn test_config_rejects_unknown_policy() {
        let err = parse("[decode]\npolicy = \"sloppy\"").unwrap_err();
        assert!(matches!(err, AppError::ConfigValidation { field: "config", .. }));
    }

    #[test]
    fn test_config_rejects_tiny_frame_size() {
        let err = parse("[io]\nmax_frame_size = 1").unwrap_err();
        assert!(matches!(
            err,
            AppError::ConfigValidation {
                field: "io.max_frame_size",
                ..
            }
        ));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = load(Some(Path::new("/nonexistent/cobs.toml"))).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }
}
