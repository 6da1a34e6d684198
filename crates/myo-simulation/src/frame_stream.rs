//! Frame pacing for the live-loop shape
//!
//! Emits simulator frames over an `mpsc` channel at the configured
//! sample rate, giving downstream consumers the same seam a live
//! acquisition loop would offer.

use crate::simulator::SignalSimulator;
use myo_core::SampleFrame;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

/// Spawn a task producing frames at the simulator's sample rate.
///
/// `ticks` bounds the number of frames; `None` streams until the
/// receiver is dropped. The sender task exits on either condition.
pub fn spawn_frame_stream(
    mut simulator: SignalSimulator,
    ticks: Option<u64>,
) -> mpsc::Receiver<SampleFrame> {
    let (sender, receiver) = mpsc::channel(64);
    let period = Duration::from_secs_f64(1.0 / simulator.config().sample_rate);

    tokio::spawn(async move {
        let mut timer = interval(period);
        let mut remaining = ticks;

        loop {
            if remaining == Some(0) {
                break;
            }
            timer.tick().await;

            let frame = simulator.next_frame();
            if sender.send(frame).await.is_err() {
                break;
            }
            if let Some(n) = remaining.as_mut() {
                *n -= 1;
            }
        }
    });

    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::SimulatorConfig;

    #[tokio::test]
    async fn test_bounded_stream_ends() {
        let config = SimulatorConfig {
            sample_rate: 1000.0,
            seed: Some(7),
            ..SimulatorConfig::default()
        };
        let simulator = SignalSimulator::new(config).unwrap();

        let mut receiver = spawn_frame_stream(simulator, Some(5));

        let mut count = 0;
        while let Some(frame) = receiver.recv().await {
            assert_eq!(frame.channel_count(), 4);
            count += 1;
        }
        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn test_dropping_receiver_stops_stream() {
        let config = SimulatorConfig {
            sample_rate: 1000.0,
            seed: Some(7),
            ..SimulatorConfig::default()
        };
        let simulator = SignalSimulator::new(config).unwrap();

        let mut receiver = spawn_frame_stream(simulator, None);
        let first = receiver.recv().await;
        assert!(first.is_some());
        drop(receiver);
        // The producer task notices the closed channel and exits on its
        // next send; nothing to assert beyond not hanging.
    }
}
