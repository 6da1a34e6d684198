//! Basic usage of the detection primitives
//!
//! Demonstrates the running-statistics peak judgment and the gesture
//! state machine on scripted data, without any async runtime.

use myo_core::MyoResult;
use myo_detect::{DetectionConfig, DetectionEngine, GestureClassifier, GestureConfig, RunningStats};
use myo_core::SampleFrame;
use std::time::Duration;

fn main() -> MyoResult<()> {
    println!("=== Detection primitives: basic usage ===\n");

    peak_example();
    gesture_example();
    engine_example()?;

    println!("\n=== Done ===");
    Ok(())
}

/// Running statistics: a drifting baseline with one injected artifact.
fn peak_example() {
    println!("1. Peak judgment on a single channel");

    let mut stats = RunningStats::new();
    for i in 0..60 {
        let mut value = 12.0 + if i % 2 == 0 { 1.0 } else { -1.0 };
        if i == 45 {
            value += 30.0; // injected artifact
        }

        stats.update(value);
        if stats.is_peak(value) {
            println!(
                "   sample {:>2}: {:>6.2} is a peak (mean {:.2} ± {:.2}, z {:.2})",
                i,
                value,
                stats.mean(),
                stats.std_dev(),
                stats.z_score(value)
            );
        }
    }
}

/// Gesture machine: a double clench followed by a quiet stretch.
fn gesture_example() {
    println!("\n2. Gesture classification on a normalized stream");

    let mut classifier = GestureClassifier::new(GestureConfig::default());
    let script = [
        (0.95, 6),  // first clench, 0.3s
        (0.0, 10),  // release, 0.5s
        (0.95, 6),  // second clench inside the gap window
        (0.0, 60),  // quiet tail
    ];

    let mut now = Duration::ZERO;
    for &(level, ticks) in &script {
        for _ in 0..ticks {
            if let Some(event) = classifier.on_sample(level, now) {
                println!("   {:>5.2}s: {}", now.as_secs_f64(), event);
            }
            now += Duration::from_millis(50);
        }
    }
}

/// Both paths at once through the composed engine.
fn engine_example() -> MyoResult<()> {
    println!("\n3. Composed engine over sample frames");

    let mut config = DetectionConfig::default();
    config.channel_count = 2;
    let mut engine = DetectionEngine::new(config)?;

    let mut now = Duration::ZERO;
    for i in 0..50 {
        let spike = if i == 30 { 60.0 } else { 0.0 };
        let control = if (10..14).contains(&i) { 0.97 } else { 0.5 };
        let frame = SampleFrame::new(vec![15.0 + spike, 22.0], control)?;

        for event in engine.tick(&frame, now)? {
            println!("   {:>5.2}s: {:?}", now.as_secs_f64(), event);
        }
        now += Duration::from_millis(50);
    }

    Ok(())
}
