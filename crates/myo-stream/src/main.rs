//! Demo: a simulated clench session through the detection service
//!
//! Signal flow: simulator → detection service → stdout consumer.

use chrono::Utc;
use myo_core::{EventKind, MonotonicClock};
use myo_detect::DetectionConfig;
use myo_simulation::{spawn_frame_stream, ActivationPattern, SignalSimulator, SimulatorConfig};
use myo_stream::start_detection_service;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let detection = DetectionConfig::default();

    let simulator = SignalSimulator::new(SimulatorConfig {
        channel_count: detection.channel_count,
        pattern: ActivationPattern::DoublePulse {
            start: 1.0,
            width: 0.3,
            gap: 0.5,
            level: 0.95,
        },
        seed: Some(1),
        ..SimulatorConfig::default()
    })?;

    println!("Simulated session: double clench at 1.0s, 200 Hz, 8 seconds");

    // 8 seconds of frames at 200 Hz
    let frames = spawn_frame_stream(simulator, Some(1600));
    let clock = Arc::new(MonotonicClock::new());
    let (mut events, _control, stats) =
        start_detection_service(detection, frames, clock).await?;

    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                eprintln!("consumer lagged, {skipped} events dropped");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        let stamp = Utc::now().format("%H:%M:%S%.3f");
        match event.kind {
            EventKind::Gesture(gesture) => {
                println!(
                    "[{stamp}] {:>7.3}s  gesture: {}",
                    event.at.as_secs_f64(),
                    gesture
                );
            }
            EventKind::Peak(peak) => {
                println!(
                    "[{stamp}] {:>7.3}s  peak: ch{} {:>7.1} (z {:.2})",
                    event.at.as_secs_f64(),
                    peak.channel,
                    peak.amplitude,
                    peak.z_score
                );
            }
        }
    }

    let stats = stats.lock().await.clone();
    println!(
        "Session complete: {} frames, {} peaks, {} gestures",
        stats.frames_processed, stats.peaks_detected, stats.gestures_emitted
    );

    Ok(())
}
