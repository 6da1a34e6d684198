//! Replay of recorded frame sequences
//!
//! A recorded session is a list of frames with offsets from the session
//! start. Replay feeds them through the same `mpsc` seam a live
//! acquisition loop uses, preserving the original relative timing, so
//! the detectors cannot tell replayed data from live data.

use myo_core::SampleFrame;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// One frame of a recorded session.
#[derive(Debug, Clone)]
pub struct RecordedFrame {
    /// Offset from the start of the recording
    pub offset: Duration,
    /// The frame as it was captured
    pub frame: SampleFrame,
}

/// Spawn a task that replays `frames` with their recorded timing.
///
/// Offsets are interpreted relative to the moment the task starts. The
/// task exits when the recording is exhausted or the receiver is
/// dropped.
pub fn spawn_replay(frames: Vec<RecordedFrame>) -> mpsc::Receiver<SampleFrame> {
    let (sender, receiver) = mpsc::channel(64);

    tokio::spawn(async move {
        let start = Instant::now();
        for recorded in frames {
            sleep_until(start + recorded.offset).await;
            if sender.send(recorded.frame).await.is_err() {
                break;
            }
        }
    });

    receiver
}
