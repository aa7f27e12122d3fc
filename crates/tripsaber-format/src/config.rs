//! Mapping configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from [`MappingConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// A value that must be strictly positive is not.
    #[error("{field} must be greater than 0, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// A value that must not be negative is.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// Beats-per-measure is zero.
    #[error("beats_per_measure must be at least 1")]
    ZeroBeatsPerMeasure,
}

/// Parameters of the geometry and timing transform.
///
/// Read-only for the duration of a conversion. Every field takes part in the
/// song identity, so changing any of them changes the jitter sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingConfig {
    /// Horizontal distance between the outermost lane centres, in metres.
    pub x_range: f64,
    /// Vertical distance between the lowest and highest row centres.
    pub y_range: f64,
    /// Height of the floor the lattice sits on.
    pub y_min: f64,
    /// Horizontal jitter as a fraction of one column step.
    pub x_wobble_factor: f64,
    /// Vertical jitter as a fraction of one row step.
    pub y_wobble_factor: f64,
    /// Applied to each difficulty's note jump speed to get the gem speed.
    pub note_speed_multiplier: f64,
    /// Largest denominator a note's sub-beat fraction may have.
    pub beats_per_measure: u16,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            x_range: 1.5,
            y_range: 1.05,
            y_min: 0.4,
            x_wobble_factor: 0.1,
            y_wobble_factor: 0.1,
            note_speed_multiplier: 2.8,
            beats_per_measure: 4,
        }
    }
}

impl MappingConfig {
    /// Parses a config from JSON string. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the config to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Checks that every value is usable by the transform.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("x_range", self.x_range)?;
        positive("y_range", self.y_range)?;
        non_negative("y_min", self.y_min)?;
        non_negative("x_wobble_factor", self.x_wobble_factor)?;
        non_negative("y_wobble_factor", self.y_wobble_factor)?;
        positive("note_speed_multiplier", self.note_speed_multiplier)?;
        if self.beats_per_measure == 0 {
            return Err(ConfigError::ZeroBeatsPerMeasure);
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(MappingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = MappingConfig::from_json(r#"{"x_range": 2.5, "y_min": 0.3}"#).unwrap();
        assert_eq!(
            config,
            MappingConfig {
                x_range: 2.5,
                y_min: 0.3,
                ..MappingConfig::default()
            }
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(MappingConfig::from_json(r#"{"x_rnage": 2.5}"#).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = MappingConfig {
            x_range: 0.0,
            ..MappingConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "x_range",
                value: 0.0
            })
        );

        let config = MappingConfig {
            y_wobble_factor: -0.1,
            ..MappingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "y_wobble_factor",
                ..
            })
        ));

        let config = MappingConfig {
            y_range: f64::NAN,
            ..MappingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "y_range",
                ..
            })
        ));

        let config = MappingConfig {
            beats_per_measure: 0,
            ..MappingConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBeatsPerMeasure));
    }
}
