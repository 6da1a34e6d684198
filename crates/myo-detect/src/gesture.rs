//! Clench gesture state machine
//!
//! Hysteresis plus wall-clock timing over the normalized control
//! channel: two thresholds (high to trigger, lower to release) prevent
//! chatter near a single boundary, and the hold/double windows are
//! measured in elapsed time rather than sample count, so the machine
//! tolerates irregular sampling cadence by construction.

use myo_core::{GestureEvent, MyoError, MyoResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and threshold parameters for gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Normalized level above which an activation begins
    pub threshold_high: f64,
    /// Normalized level below which an activation releases. Must stay
    /// above equilibrium, or rest noise chatters across the release edge
    pub threshold_low: f64,
    /// Continuous activation longer than this emits [`GestureEvent::Hold`]
    pub hold_time: Duration,
    /// Maximum gap after a release in which a second rising edge counts
    /// as a double activation
    pub double_gap_max: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold_high: 0.9,
            threshold_low: 0.5,
            hold_time: Duration::from_secs(2),
            double_gap_max: Duration::from_millis(1500),
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> MyoResult<()> {
        if self.threshold_low >= self.threshold_high {
            return Err(MyoError::ConfigurationError {
                message: format!(
                    "release threshold {} must sit below activation threshold {}",
                    self.threshold_low, self.threshold_high
                ),
            });
        }
        if self.hold_time.is_zero() || self.double_gap_max.is_zero() {
            return Err(MyoError::ConfigurationError {
                message: "hold and double-gap windows must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    /// Resting below both thresholds
    Idle,
    /// Signal crossed the high threshold and has not released yet
    Clenching,
    /// Released after a short activation; armed for a second rising edge
    WaitingForSecond,
}

/// State machine deriving gesture events from one normalized stream.
///
/// One instance per monitored stream; instances share nothing. Each tick
/// is a pure step of (phase, value, time): no output depends on anything
/// older than the phase and the two recorded instants. `now` must be
/// non-decreasing across calls.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    phase: GesturePhase,
    activation_start: Duration,
    release_time: Duration,
    hold_triggered: bool,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        GestureClassifier {
            config,
            phase: GesturePhase::Idle,
            activation_start: Duration::ZERO,
            release_time: Duration::ZERO,
            hold_triggered: false,
        }
    }

    /// Advance the machine by one tick; emits at most one event.
    ///
    /// Values inside the dead band between the two thresholds never
    /// cause a transition, in any phase: they neither confirm a release
    /// nor an onset. The double-gap timeout is evaluated here on every
    /// tick rather than by a timer, so its resolution is bounded by the
    /// sampling cadence.
    pub fn on_sample(&mut self, avg: f64, now: Duration) -> Option<GestureEvent> {
        match self.phase {
            GesturePhase::Idle | GesturePhase::WaitingForSecond => {
                if avg > self.config.threshold_high {
                    let was_waiting = self.phase == GesturePhase::WaitingForSecond;
                    self.phase = GesturePhase::Clenching;
                    self.activation_start = now;
                    self.hold_triggered = false;

                    // Double detection fires on the second rising edge,
                    // not on its eventual release.
                    if was_waiting {
                        return Some(GestureEvent::DoubleActivation);
                    }
                    return None;
                }

                if self.phase == GesturePhase::WaitingForSecond
                    && now.saturating_sub(self.release_time) > self.config.double_gap_max
                {
                    self.phase = GesturePhase::Idle;
                    return Some(GestureEvent::SingleActivation);
                }

                None
            }
            GesturePhase::Clenching => {
                if avg > self.config.threshold_high {
                    if !self.hold_triggered
                        && now.saturating_sub(self.activation_start) > self.config.hold_time
                    {
                        self.hold_triggered = true;
                        return Some(GestureEvent::Hold);
                    }
                    return None;
                }

                if avg < self.config.threshold_low {
                    let was_hold = self.hold_triggered;
                    self.hold_triggered = false;
                    if was_hold {
                        // A hold consumes the activation outright; no
                        // double-detection window is armed.
                        self.phase = GesturePhase::Idle;
                    } else {
                        self.phase = GesturePhase::WaitingForSecond;
                        self.release_time = now;
                    }
                }

                None
            }
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }
}
