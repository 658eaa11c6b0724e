//! Run configuration
//!
//! Calibration constants, classification thresholds and the parse policy
//! are passed explicitly through the pipeline instead of being compiled in.

use crate::domain::classify::Thresholds;
use crate::domain::risk::Calibration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How malformed input is handled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Reject malformed numbers and unknown IDs
    #[default]
    Strict,
    /// Coerce malformed numbers to 0 and resolve unknown IDs to the nearest
    /// search bound
    Lenient,
}

/// Configuration of a detector run
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub parse_policy: ParsePolicy,
    pub calibration: Calibration,
    pub thresholds: Thresholds,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `DetectorConfig`
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Thresholds are not ordered
    #[error(
        "medical supervision threshold ({medical_supervision}) must be greater than quarantine threshold ({quarantine})"
    )]
    ThresholdOrder {
        medical_supervision: f64,
        quarantine: f64,
    },

    /// Calibration constant is zero, negative or not finite
    #[error("calibration value {name} must be positive and finite, found {value}")]
    InvalidCalibration { name: &'static str, value: f64 },
}

impl DetectorConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Thresholds {
            medical_supervision,
            quarantine,
        } = self.thresholds;
        if !(medical_supervision > quarantine) {
            return Err(ConfigError::ThresholdOrder {
                medical_supervision,
                quarantine,
            });
        }

        for (name, value) in [
            ("min_distance", self.calibration.min_distance),
            ("max_time", self.calibration.max_time),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidCalibration { name, value });
            }
        }

        Ok(())
    }

    /// Builder-style parse policy override
    pub fn with_parse_policy(mut self, policy: ParsePolicy) -> Self {
        self.parse_policy = policy;
        self
    }
}
