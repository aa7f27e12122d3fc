//! Error type for conversion.

use std::path::PathBuf;

use thiserror::Error;
use tripsaber_format::ConfigError;

/// Error type for conversion.
///
/// Every variant aborts the whole document build; there is no partial output.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Beat is negative or not finite, or the subdivision cap is zero.
    #[error("Invalid beat: {0}")]
    InvalidBeat(String),

    /// Lane coordinates outside the 4x3 lattice.
    #[error("Lane out of range: column {column}, row {row} (expected column 0-3, row 0-2)")]
    OutOfRange { column: i64, row: i64 },

    /// A declared difficulty file is absent or unreadable.
    #[error("Missing difficulty data for {difficulty} ({filename}): {reason}")]
    MissingDifficultyData {
        difficulty: String,
        filename: String,
        reason: String,
    },

    /// Required source metadata is absent or has the wrong type.
    #[error("Malformed source: {0}")]
    MalformedSource(String),

    /// Mapping configuration rejected by validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Audio duration could not be determined.
    #[error("Audio probe failed for {path}: {reason}")]
    AudioProbe { path: PathBuf, reason: String },

    /// IO error while reading the package or writing outputs.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ConvertError {
    /// Creates an audio probe error.
    pub fn audio_probe(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ConvertError::AudioProbe {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
