//! Errors of the `cobs` command-line tool
//!
//! Use `Result<T>` as shorthand for `std::result::Result<T, AppError>`.

use cobs_codec::CobsError;
use std::fmt;
use std::path::PathBuf;

/// All errors of the `cobs` command-line tool
#[derive(Debug)]
pub enum AppError {
    // === IO ===
    /// Reading input or writing output failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file could not be read
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid config or argument value
    ConfigValidation { field: &'static str, reason: String },

    // === Input ===
    /// Hex input could not be parsed
    InvalidHex { position: usize, reason: String },

    // === Codec ===
    /// Encode or decode failed
    Codec(CobsError),

    // === Output ===
    /// JSON report serialization failed
    Json { source: serde_json::Error },
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::ConfigRead { source, .. } => Some(source),
            Self::Codec(source) => Some(source),
            Self::Json { source } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "IO error: {}: {}", path.display(), source),
            Self::ConfigRead { path, .. } => {
                write!(f, "Cannot read config file: {}", path.display())
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::InvalidHex { position, reason } => {
                write!(f, "Invalid hex input at position {}: {}", position, reason)
            }
            Self::Codec(err) => write!(f, "{}", err),
            Self::Json { source } => write!(f, "Cannot serialize report: {}", source),
        }
    }
}

impl From<CobsError> for AppError {
    fn from(err: CobsError) -> Self {
        Self::Codec(err)
    }
}

/// Alias for Result with AppError
pub type Result<T> = std::result::Result<T, AppError>;
