//! Emitted event types
//!
//! Events are derived judgments, not stored entities: the detectors emit
//! them and forget them. Delivery (display, broadcast, logging) is the
//! consumer's concern.

use core::fmt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Gesture decoded from the normalized control channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureEvent {
    /// Activation sustained continuously past the hold threshold
    Hold,
    /// One activation released with no second activation inside the gap
    /// window
    SingleActivation,
    /// A second activation beginning inside the gap window after a
    /// non-hold release
    DoubleActivation,
}

impl GestureEvent {
    /// Stable string form for display and downstream consumers.
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureEvent::Hold => "hold",
            GestureEvent::SingleActivation => "single-activation",
            GestureEvent::DoubleActivation => "double-activation",
        }
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sample judged anomalous against its channel's running baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakEvent {
    /// Channel the sample arrived on
    pub channel: usize,
    /// The amplitude that was judged
    pub amplitude: f64,
    /// z-score of the amplitude against the running baseline
    pub z_score: f64,
    /// Running mean at the moment of judgment (includes this sample)
    pub mean: f64,
    /// Running standard deviation at the moment of judgment
    pub std_dev: f64,
}

/// What one detection tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Peak(PeakEvent),
    Gesture(GestureEvent),
}

/// Envelope broadcast by the streaming service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionEvent {
    /// Identity of the emitting stream session
    pub stream: Uuid,
    /// Elapsed stream time of the tick that produced the event
    pub at: Duration,
    /// The event itself
    pub kind: EventKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_event_display() {
        assert_eq!(GestureEvent::Hold.to_string(), "hold");
        assert_eq!(GestureEvent::SingleActivation.to_string(), "single-activation");
        assert_eq!(GestureEvent::DoubleActivation.to_string(), "double-activation");
    }

    #[test]
    fn test_event_kind_roundtrip() {
        let kind = EventKind::Peak(PeakEvent {
            channel: 2,
            amplitude: 42.0,
            z_score: 3.1,
            mean: 10.0,
            std_dev: 9.5,
        });

        let json = serde_json::to_string(&kind).unwrap();
        let back: EventKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, back);
    }
}
