//! Per-tick composition of the two detection paths
//!
//! Raw channel amplitudes fan out to the per-channel peak trackers while
//! the normalized control value drives the gesture classifier. The two
//! paths share nothing; this type only co-drives them so that callers
//! have a single synchronous tick to call from their loop.

use crate::config::DetectionConfig;
use crate::gesture::{GestureClassifier, GesturePhase};
use crate::normalize::Normalizer;
use crate::peak::PeakDetector;
use crate::running_stats::RunningStats;
use myo_core::{EventKind, MyoResult, SampleFrame};
use std::time::Duration;

/// Synchronous detection engine for one stream.
pub struct DetectionEngine {
    config: DetectionConfig,
    peaks: PeakDetector,
    gesture: GestureClassifier,
    normalizer: Normalizer,
}

impl DetectionEngine {
    pub fn new(config: DetectionConfig) -> MyoResult<Self> {
        config.validate()?;
        let peaks = PeakDetector::new(config.channel_count, config.peak);
        let gesture = GestureClassifier::new(config.gesture);
        let normalizer = Normalizer::new(config.normalizer)?;

        Ok(DetectionEngine {
            config,
            peaks,
            gesture,
            normalizer,
        })
    }

    /// Run one frame through both detection paths.
    ///
    /// Returns every event the tick produced: zero or more peaks (at
    /// most one per channel) and at most one gesture. The returned
    /// vector is empty on the vast majority of ticks and costs no
    /// allocation in that case.
    pub fn tick(&mut self, frame: &SampleFrame, now: Duration) -> MyoResult<Vec<EventKind>> {
        let mut events = Vec::new();

        for sample in frame.samples() {
            if let Some(peak) = self.peaks.observe(sample.channel, sample.amplitude)? {
                events.push(EventKind::Peak(peak));
            }
        }

        let avg = self.normalizer.normalize(frame.control);
        if let Some(gesture) = self.gesture.on_sample(avg, now) {
            events.push(EventKind::Gesture(gesture));
        }

        Ok(events)
    }

    /// Discard all accumulated state, keeping the configuration.
    ///
    /// This is the explicit re-initialization path; nothing inside the
    /// engine resets implicitly.
    pub fn reset(&mut self) {
        self.peaks = PeakDetector::new(self.config.channel_count, self.config.peak);
        self.gesture = GestureClassifier::new(self.config.gesture);
    }

    /// Read access to one channel's running statistics.
    pub fn channel_stats(&self, channel: usize) -> Option<&RunningStats> {
        self.peaks.stats(channel)
    }

    /// Current gesture phase.
    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myo_core::GestureEvent;

    fn frame(channels: Vec<f64>, control: f64) -> SampleFrame {
        SampleFrame::new(channels, control).unwrap()
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = DetectionConfig::default();
        config.channel_count = 0;
        assert!(DetectionEngine::new(config).is_err());
    }

    #[test]
    fn test_peak_path_through_frames() {
        let mut config = DetectionConfig::default();
        config.channel_count = 2;
        let mut engine = DetectionEngine::new(config).unwrap();

        // Nine quiet frames, then an outlier on channel 1 only.
        for i in 0..9 {
            let events = engine
                .tick(&frame(vec![10.0, 20.0], 0.5), secs(i as f64 * 0.005))
                .unwrap();
            assert!(events.is_empty());
        }

        let events = engine
            .tick(&frame(vec![10.0, 90.0], 0.5), secs(0.045))
            .unwrap();
        assert_eq!(events.len(), 1);
        match events[0] {
            EventKind::Peak(peak) => {
                assert_eq!(peak.channel, 1);
                assert_eq!(peak.amplitude, 90.0);
            }
            other => panic!("expected peak, got {:?}", other),
        }
    }

    #[test]
    fn test_gesture_path_through_frames() {
        let mut config = DetectionConfig::default();
        config.channel_count = 1;
        let mut engine = DetectionEngine::new(config).unwrap();

        // Raw control 0.98 normalizes to 0.96, above the 0.9 onset;
        // raw 0.5 normalizes to 0.0.
        let mut events = Vec::new();
        let mut now = Duration::ZERO;
        let script = [(0.98, 6), (0.5, 60)];
        for &(control, ticks) in &script {
            for _ in 0..ticks {
                events.extend(engine.tick(&frame(vec![10.0], control), now).unwrap());
                now += secs(0.05);
            }
        }

        let gestures: Vec<&EventKind> = events
            .iter()
            .filter(|e| matches!(e, EventKind::Gesture(_)))
            .collect();
        assert_eq!(gestures.len(), 1);
        assert!(matches!(
            gestures[0],
            EventKind::Gesture(GestureEvent::SingleActivation)
        ));
    }

    #[test]
    fn test_reset_discards_state() {
        let mut config = DetectionConfig::default();
        config.channel_count = 1;
        let mut engine = DetectionEngine::new(config).unwrap();

        for i in 0..20 {
            engine
                .tick(&frame(vec![10.0], 0.98), secs(i as f64 * 0.05))
                .unwrap();
        }
        assert_eq!(engine.channel_stats(0).unwrap().count(), 20);
        assert_eq!(engine.phase(), GesturePhase::Clenching);

        engine.reset();
        assert_eq!(engine.channel_stats(0).unwrap().count(), 0);
        assert_eq!(engine.phase(), GesturePhase::Idle);
    }
}
