//! Frame simulator with seeded noise
//!
//! Produces the per-tick [`SampleFrame`]s a live acquisition loop would:
//! one raw amplitude per channel around a baseline that scales with the
//! scripted activation, plus the raw control-channel reading the gesture
//! path normalizes downstream. Fully deterministic under a fixed seed.

use crate::patterns::ActivationPattern;
use myo_core::{MyoError, MyoResult, SampleFrame};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Configuration for frame simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Number of channels to simulate
    pub channel_count: usize,
    /// Frame rate in Hz
    pub sample_rate: f64,
    /// Scripted activation driving both paths
    pub pattern: ActivationPattern,
    /// Raw channel amplitude at rest (device units)
    pub baseline: f64,
    /// Raw amplitude added at full activation
    pub activation_gain: f64,
    /// Gaussian noise standard deviation on channel amplitudes
    pub noise_std: f64,
    /// Gaussian noise standard deviation on the control reading
    pub control_noise_std: f64,
    /// Probability per frame of an artifact spike on one channel
    pub artifact_prob: f64,
    /// Artifact spike amplitude (device units)
    pub artifact_amp: f64,
    /// Random seed; `None` seeds from the system clock
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            channel_count: 4,
            sample_rate: 200.0,
            pattern: ActivationPattern::Constant { level: 0.0 },
            baseline: 10.0,
            activation_gain: 80.0,
            noise_std: 2.0,
            control_noise_std: 0.01,
            artifact_prob: 0.0,
            artifact_amp: 120.0,
            seed: None,
        }
    }
}

/// Deterministic generator of acquisition-shaped frames.
pub struct SignalSimulator {
    config: SimulatorConfig,
    rng: rand::rngs::StdRng,
    channel_noise: Normal<f64>,
    control_noise: Normal<f64>,
    tick: u64,
}

impl SignalSimulator {
    pub fn new(config: SimulatorConfig) -> MyoResult<Self> {
        if config.channel_count == 0 {
            return Err(MyoError::SimulationError {
                message: "channel count must be at least 1".to_string(),
            });
        }
        if config.sample_rate <= 0.0 {
            return Err(MyoError::SimulationError {
                message: format!("sample rate {} must be positive", config.sample_rate),
            });
        }

        let seed = config.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_secs()
        });

        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        let channel_noise = Normal::new(0.0, config.noise_std).map_err(|e| {
            MyoError::SimulationError {
                message: format!("failed to create channel noise distribution: {}", e),
            }
        })?;
        let control_noise = Normal::new(0.0, config.control_noise_std).map_err(|e| {
            MyoError::SimulationError {
                message: format!("failed to create control noise distribution: {}", e),
            }
        })?;

        Ok(SignalSimulator {
            config,
            rng,
            channel_noise,
            control_noise,
            tick: 0,
        })
    }

    /// Generate the next frame and advance simulated time by one tick.
    pub fn next_frame(&mut self) -> SampleFrame {
        let time = self.tick as f64 / self.config.sample_rate;
        self.tick += 1;

        let activation = self.config.pattern.level_at(time);

        let mut channels = Vec::with_capacity(self.config.channel_count);
        for _ in 0..self.config.channel_count {
            let noise = self.channel_noise.sample(&mut self.rng);
            channels.push(self.config.baseline + activation * self.config.activation_gain + noise);
        }

        // Occasional artifact spike on one random channel
        if self.config.artifact_prob > 0.0 && self.rng.gen::<f64>() < self.config.artifact_prob {
            let channel = self.rng.gen_range(0..self.config.channel_count);
            let sign = if self.rng.gen::<bool>() { 1.0 } else { -1.0 };
            channels[channel] += sign * self.config.artifact_amp;
        }

        // Raw control reading: equilibrium 0.5, full activation 1.0.
        let control = (0.5 + 0.5 * activation + self.control_noise.sample(&mut self.rng))
            .clamp(0.0, 1.0);

        SampleFrame { channels, control }
    }

    /// Generate a batch of consecutive frames.
    pub fn frames(&mut self, count: usize) -> Vec<SampleFrame> {
        (0..count).map(|_| self.next_frame()).collect()
    }

    /// Rewind simulated time to zero. The RNG stream is not rewound.
    pub fn reset_time(&mut self) {
        self.tick = 0;
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}
