//! Control-channel normalization
//!
//! The gesture classifier works on a normalized scalar where the
//! sensor's equilibrium maps to 0.0 and its nominal maximum to 1.0. Raw
//! readings below the equilibrium floor clamp up to it before rescaling,
//! so rest-level noise cannot produce negative values. Threshold
//! crossings downstream are always evaluated on the normalized value,
//! never on raw amplitude.

use myo_core::{MyoError, MyoResult};
use serde::{Deserialize, Serialize};

/// Normalization parameters for the control channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Raw value treated as equilibrium; readings below clamp up to it.
    /// Must lie in `[0, 1)`.
    pub floor: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self { floor: 0.5 }
    }
}

/// Maps raw control readings onto the `[0, 1]` activation scale.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> MyoResult<Self> {
        if !(0.0..1.0).contains(&config.floor) {
            return Err(MyoError::ConfigurationError {
                message: format!("normalizer floor {} must be in [0, 1)", config.floor),
            });
        }
        Ok(Normalizer { config })
    }

    /// Clamp to the floor, then rescale so the floor maps to 0.0 and a
    /// raw 1.0 maps to 1.0. At the default floor of 0.5 this is
    /// `(clamped - 0.5) * 2`.
    ///
    /// Raw readings above 1.0 come out above 1.0; range enforcement at
    /// the sensor envelope is the acquisition boundary's decision, not
    /// this layer's.
    pub fn normalize(&self, raw: f64) -> f64 {
        let clamped = raw.max(self.config.floor);
        (clamped - self.config.floor) / (1.0 - self.config.floor)
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_normalizer() -> Normalizer {
        Normalizer::new(NormalizerConfig::default()).unwrap()
    }

    #[test]
    fn test_equilibrium_maps_to_zero() {
        let n = default_normalizer();
        assert_eq!(n.normalize(0.5), 0.0);
    }

    #[test]
    fn test_below_floor_clamps() {
        let n = default_normalizer();
        assert_eq!(n.normalize(0.3), 0.0);
        assert_eq!(n.normalize(-2.0), 0.0);
    }

    #[test]
    fn test_rescaling() {
        let n = default_normalizer();
        assert_eq!(n.normalize(1.0), 1.0);
        assert!((n.normalize(0.75) - 0.5).abs() < 1e-12);
        assert!((n.normalize(0.95) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_above_nominal_max_passes_through() {
        let n = default_normalizer();
        assert!(n.normalize(1.2) > 1.0);
    }

    #[test]
    fn test_invalid_floor_rejected() {
        assert!(Normalizer::new(NormalizerConfig { floor: 1.0 }).is_err());
        assert!(Normalizer::new(NormalizerConfig { floor: -0.1 }).is_err());
    }
}
