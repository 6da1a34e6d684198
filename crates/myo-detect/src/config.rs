//! Detection configuration with JSON round-trip

use crate::gesture::GestureConfig;
use crate::normalize::NormalizerConfig;
use crate::running_stats::PeakConfig;
use myo_core::{MyoError, MyoResult};
use serde::{Deserialize, Serialize};

/// Complete configuration for one detection stream.
///
/// The defaults match the original deployment: four acquisition
/// channels, peaks at 1.5 standard deviations after a ten-sample
/// warmup, and the 0.9/0.5 hysteresis pair with a two-second hold and
/// 1.5-second double-gap window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Number of acquisition channels tracked for peaks
    pub channel_count: usize,
    /// Peak judgment thresholds
    pub peak: PeakConfig,
    /// Gesture thresholds and timing windows
    pub gesture: GestureConfig,
    /// Control-channel normalization
    pub normalizer: NormalizerConfig,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            channel_count: 4,
            peak: PeakConfig::default(),
            gesture: GestureConfig::default(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl DetectionConfig {
    /// Validate the whole configuration.
    pub fn validate(&self) -> MyoResult<()> {
        if self.channel_count == 0 {
            return Err(MyoError::ConfigurationError {
                message: "channel count must be at least 1".to_string(),
            });
        }
        if self.peak.z_threshold <= 0.0 {
            return Err(MyoError::ConfigurationError {
                message: "peak z-threshold must be positive".to_string(),
            });
        }
        if self.peak.epsilon <= 0.0 {
            return Err(MyoError::ConfigurationError {
                message: "peak epsilon must be positive".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.normalizer.floor) {
            return Err(MyoError::ConfigurationError {
                message: format!(
                    "normalizer floor {} must be in [0, 1)",
                    self.normalizer.floor
                ),
            });
        }
        self.gesture.validate()
    }

    /// Export configuration to JSON.
    pub fn to_json(&self) -> MyoResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MyoError::ConfigurationError {
            message: format!("failed to serialize configuration: {}", e),
        })
    }

    /// Import and validate configuration from JSON.
    pub fn from_json(json: &str) -> MyoResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MyoError::ConfigurationError {
                message: format!("failed to deserialize configuration: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }
}
