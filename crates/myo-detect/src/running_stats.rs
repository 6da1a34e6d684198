//! Online per-channel statistics with peak judgment
//!
//! Welford's algorithm: running mean and population variance from a
//! sample stream without storing history. One instance tracks one
//! channel; instances share nothing.

use serde::{Deserialize, Serialize};

/// Thresholds for the z-score peak judgment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakConfig {
    /// Minimum observations before any sample can register as a peak
    pub min_samples: u64,
    /// z-score at or above which a sample counts as a peak
    pub z_threshold: f64,
    /// Added to the standard deviation before division so a perfectly
    /// flat signal yields a finite z-score instead of NaN/infinity
    pub epsilon: f64,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            min_samples: 10,
            z_threshold: 1.5,
            epsilon: 1e-6,
        }
    }
}

/// Running mean and population standard deviation for one channel.
///
/// Mutated only by sequential [`update`](RunningStats::update) calls;
/// there is no implicit reset. A caller needing a per-session restart
/// constructs a new instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunningStats {
    config: PeakConfig,
    count: u64,
    mean: f64,
    sum_sq_dev: f64,
    std_dev: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::with_config(PeakConfig::default())
    }

    pub fn with_config(config: PeakConfig) -> Self {
        RunningStats {
            config,
            count: 0,
            mean: 0.0,
            sum_sq_dev: 0.0,
            std_dev: 0.0,
        }
    }

    /// Fold one sample into the running statistics. O(1), no allocation,
    /// never fails.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.sum_sq_dev += delta * delta2;

        if self.count > 1 {
            self.std_dev = (self.sum_sq_dev / self.count as f64).sqrt();
        }
    }

    /// Judge the sample that was just folded in by `update`.
    ///
    /// The baseline already contains `value`: an extreme outlier
    /// partially absorbs itself into the running mean before being
    /// judged against it, which damps sensitivity to sustained shifts.
    /// Intentional tuning; do not move the judgment ahead of the
    /// update.
    ///
    /// Always `false` until `min_samples` observations have accumulated.
    pub fn is_peak(&self, value: f64) -> bool {
        if self.count < self.config.min_samples {
            return false;
        }
        self.z_score(value) >= self.config.z_threshold
    }

    /// Absolute z-score of `value` against the current baseline.
    pub fn z_score(&self, value: f64) -> f64 {
        (value - self.mean).abs() / (self.std_dev + self.config.epsilon)
    }

    /// Number of samples observed so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running arithmetic mean of all samples observed.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation (divisor = count) of all samples
    /// observed; `0.0` until the second sample.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}
