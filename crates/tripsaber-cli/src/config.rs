//! Mapping configuration and output root resolution.
//!
//! Configuration is layered: built-in defaults, then an optional JSON file,
//! then individual command-line flags.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tripsaber_format::MappingConfig;

/// Audio Trip's custom songs folder, relative to the home directory.
pub const AUDIO_TRIP_SONGS_DIR: &str = "AppData/LocalLow/Kinemotik Studios/Audio Trip/Songs";

/// Per-field overrides taken from command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingOverrides {
    pub x_range: Option<f64>,
    pub y_range: Option<f64>,
    pub y_min: Option<f64>,
    pub x_wobble_factor: Option<f64>,
    pub y_wobble_factor: Option<f64>,
    pub note_speed_multiplier: Option<f64>,
    pub beats_per_measure: Option<u16>,
}

impl MappingOverrides {
    /// Writes every set override into `config`.
    pub fn apply(&self, config: &mut MappingConfig) {
        if let Some(v) = self.x_range {
            config.x_range = v;
        }
        if let Some(v) = self.y_range {
            config.y_range = v;
        }
        if let Some(v) = self.y_min {
            config.y_min = v;
        }
        if let Some(v) = self.x_wobble_factor {
            config.x_wobble_factor = v;
        }
        if let Some(v) = self.y_wobble_factor {
            config.y_wobble_factor = v;
        }
        if let Some(v) = self.note_speed_multiplier {
            config.note_speed_multiplier = v;
        }
        if let Some(v) = self.beats_per_measure {
            config.beats_per_measure = v;
        }
    }
}

/// Resolves the mapping config from an optional file plus flag overrides.
///
/// The result is validated.
pub fn load_mapping_config(
    config_path: Option<&Path>,
    overrides: &MappingOverrides,
) -> Result<MappingConfig> {
    let mut config = match config_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            MappingConfig::from_json(&json)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => MappingConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate().context("Invalid mapping config")?;
    Ok(config)
}

/// Picks the output root: the explicit one, else Audio Trip's songs folder
/// under the home directory.
pub fn resolve_out_root(explicit: Option<&str>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(PathBuf::from(path)),
        None => dirs::home_dir()
            .map(|home| home.join(AUDIO_TRIP_SONGS_DIR))
            .context("Could not determine home directory; pass --out-root"),
    }
}
