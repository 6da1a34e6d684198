//! Multi-channel peak detection fan-out

use crate::running_stats::{PeakConfig, RunningStats};
use myo_core::{MyoError, MyoResult, PeakEvent};

/// Bank of per-channel running statistics.
///
/// Channels are registered once at construction and indexed directly, so
/// the per-sample path allocates nothing. Channels never share state: a
/// peak on one channel cannot disturb another channel's baseline, and
/// separate channels may be driven from separate threads by splitting
/// the bank.
#[derive(Debug, Clone)]
pub struct PeakDetector {
    trackers: Vec<RunningStats>,
}

impl PeakDetector {
    /// Register `channel_count` channels, each with a fresh tracker.
    pub fn new(channel_count: usize, config: PeakConfig) -> Self {
        PeakDetector {
            trackers: vec![RunningStats::with_config(config); channel_count],
        }
    }

    /// Fold `value` into `channel`'s statistics and judge it against the
    /// updated baseline.
    ///
    /// Returns the peak event if the value qualifies. The tracker itself
    /// never fails; the only error here is an unregistered channel index.
    pub fn observe(&mut self, channel: usize, value: f64) -> MyoResult<Option<PeakEvent>> {
        let channel_count = self.trackers.len();
        let stats = self
            .trackers
            .get_mut(channel)
            .ok_or(MyoError::UnknownChannel { channel, channel_count })?;

        stats.update(value);
        if stats.is_peak(value) {
            Ok(Some(PeakEvent {
                channel,
                amplitude: value,
                z_score: stats.z_score(value),
                mean: stats.mean(),
                std_dev: stats.std_dev(),
            }))
        } else {
            Ok(None)
        }
    }

    /// Number of registered channels.
    pub fn channel_count(&self) -> usize {
        self.trackers.len()
    }

    /// Read access to one channel's running statistics.
    pub fn stats(&self, channel: usize) -> Option<&RunningStats> {
        self.trackers.get(channel)
    }
}
