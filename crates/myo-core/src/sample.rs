//! Sample and frame containers for the per-tick processing model

use crate::error::{MyoError, MyoResult};
use serde::{Deserialize, Serialize};

/// A single reading from one acquisition channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Zero-based channel index
    pub channel: usize,
    /// Raw amplitude in the acquisition device's units (typically µV)
    pub amplitude: f64,
}

/// One tick worth of data: the latest amplitude on every registered
/// channel plus the raw control-channel reading for the gesture path.
///
/// Channels are positional: `channels[i]` is the newest reading on
/// channel `i`. Frames for a given stream must arrive in non-decreasing
/// time order; out-of-order delivery is a caller error the detectors do
/// not defend against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleFrame {
    /// Latest raw amplitude per channel
    pub channels: Vec<f64>,
    /// Raw control-channel reading, nominally [0, 1] with equilibrium
    /// around the normalizer floor. Normalization happens downstream;
    /// the frame carries what the device reported.
    pub control: f64,
}

impl SampleFrame {
    /// Create a frame, rejecting an empty channel set.
    pub fn new(channels: Vec<f64>, control: f64) -> MyoResult<Self> {
        if channels.is_empty() {
            return Err(MyoError::InvalidFrame {
                reason: "frame must carry at least one channel".to_string(),
            });
        }
        Ok(SampleFrame { channels, control })
    }

    /// Number of channels in this frame.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Iterate the frame as per-channel samples.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.channels
            .iter()
            .enumerate()
            .map(|(channel, &amplitude)| Sample { channel, amplitude })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = SampleFrame::new(vec![1.0, 2.0, 3.0, 4.0], 0.5).unwrap();
        assert_eq!(frame.channel_count(), 4);
        assert_eq!(frame.control, 0.5);
    }

    #[test]
    fn test_empty_frame_rejected() {
        assert!(SampleFrame::new(Vec::new(), 0.5).is_err());
    }

    #[test]
    fn test_sample_iteration() {
        let frame = SampleFrame::new(vec![10.0, 20.0], 0.5).unwrap();
        let samples: Vec<Sample> = frame.samples().collect();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].channel, 0);
        assert_eq!(samples[0].amplitude, 10.0);
        assert_eq!(samples[1].channel, 1);
        assert_eq!(samples[1].amplitude, 20.0);
    }
}
