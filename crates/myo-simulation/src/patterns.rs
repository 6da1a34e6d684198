//! Scripted activation patterns
//!
//! Each pattern maps elapsed time to an activation level in [0, 1],
//! mirroring the gestures the classifier is meant to decode.

use serde::{Deserialize, Serialize};

/// Activation level over time, in [0, 1]. Times are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationPattern {
    /// Flat level for the whole run
    Constant { level: f64 },
    /// Single clench: high for `width` seconds starting at `start`
    Pulse { start: f64, width: f64, level: f64 },
    /// Two clenches of `width` seconds separated by `gap` seconds
    DoublePulse {
        start: f64,
        width: f64,
        gap: f64,
        level: f64,
    },
    /// Repeating on/off cycles
    Train { period: f64, duty: f64, level: f64 },
}

impl ActivationPattern {
    /// Activation level at `time` seconds, clamped to [0, 1].
    pub fn level_at(&self, time: f64) -> f64 {
        let raw = match self {
            ActivationPattern::Constant { level } => *level,

            ActivationPattern::Pulse { start, width, level } => {
                if time >= *start && time < start + width {
                    *level
                } else {
                    0.0
                }
            }

            ActivationPattern::DoublePulse { start, width, gap, level } => {
                let first = time >= *start && time < start + width;
                let second_start = start + width + gap;
                let second = time >= second_start && time < second_start + width;
                if first || second {
                    *level
                } else {
                    0.0
                }
            }

            ActivationPattern::Train { period, duty, level } => {
                let phase = time.rem_euclid(*period);
                if phase < duty * period {
                    *level
                } else {
                    0.0
                }
            }
        };

        raw.clamp(0.0, 1.0)
    }

    /// Human-readable pattern name.
    pub fn description(&self) -> &'static str {
        match self {
            ActivationPattern::Constant { .. } => "Constant activation",
            ActivationPattern::Pulse { .. } => "Single clench",
            ActivationPattern::DoublePulse { .. } => "Double clench",
            ActivationPattern::Train { .. } => "Clench train",
        }
    }

    /// Preset patterns covering the gestures the classifier decodes.
    pub fn presets() -> Vec<(&'static str, ActivationPattern)> {
        vec![
            ("Rest", ActivationPattern::Constant { level: 0.0 }),
            (
                "Single Clench",
                ActivationPattern::Pulse { start: 0.5, width: 0.4, level: 0.95 },
            ),
            (
                "Double Clench",
                ActivationPattern::DoublePulse {
                    start: 0.5,
                    width: 0.3,
                    gap: 0.5,
                    level: 0.95,
                },
            ),
            (
                "Sustained Hold",
                ActivationPattern::Pulse { start: 0.5, width: 2.5, level: 0.95 },
            ),
            (
                "Clench Train",
                ActivationPattern::Train { period: 2.0, duty: 0.25, level: 0.95 },
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_window() {
        let pattern = ActivationPattern::Pulse { start: 1.0, width: 0.5, level: 0.9 };
        assert_eq!(pattern.level_at(0.5), 0.0);
        assert_eq!(pattern.level_at(1.0), 0.9);
        assert_eq!(pattern.level_at(1.49), 0.9);
        assert_eq!(pattern.level_at(1.5), 0.0);
    }

    #[test]
    fn test_double_pulse_windows() {
        let pattern = ActivationPattern::DoublePulse {
            start: 0.5,
            width: 0.3,
            gap: 0.5,
            level: 0.95,
        };
        assert_eq!(pattern.level_at(0.6), 0.95);
        assert_eq!(pattern.level_at(1.0), 0.0); // between the pulses
        assert_eq!(pattern.level_at(1.4), 0.95); // second pulse at 1.3..1.6
        assert_eq!(pattern.level_at(1.7), 0.0);
    }

    #[test]
    fn test_train_cycles() {
        let pattern = ActivationPattern::Train { period: 2.0, duty: 0.25, level: 0.8 };
        assert_eq!(pattern.level_at(0.1), 0.8);
        assert_eq!(pattern.level_at(0.6), 0.0);
        assert_eq!(pattern.level_at(2.2), 0.8); // next cycle
    }

    #[test]
    fn test_levels_clamped() {
        let pattern = ActivationPattern::Constant { level: 1.7 };
        assert_eq!(pattern.level_at(0.0), 1.0);
    }
}
