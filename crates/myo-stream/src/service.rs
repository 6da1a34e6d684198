//! Real-time detection service
//!
//! Consumes sample frames from an acquisition or replay source, runs the
//! per-channel peak trackers and the gesture classifier on every tick,
//! and broadcasts the resulting events to any number of subscribers.
//! All waiting happens here; the detection engine itself is synchronous
//! and never blocks.

use chrono::{DateTime, Utc};
use myo_core::{Clock, DetectionEvent, EventKind, MyoResult, SampleFrame};
use myo_detect::{DetectionConfig, DetectionEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Commands for controlling a running service.
#[derive(Debug, Clone)]
pub enum ServiceCommand {
    /// Resume processing after a stop or pause
    Start,
    /// Stop processing and discard all detector state
    Stop,
    /// Stop processing but keep detector state
    Pause,
    /// Same as `Start`
    Resume,
    /// Swap in a new configuration; detector state is rebuilt
    UpdateConfig(DetectionConfig),
}

/// Counters describing a service's session so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStats {
    pub is_running: bool,
    pub frames_processed: u64,
    pub peaks_detected: u64,
    pub gestures_emitted: u64,
    pub last_update: DateTime<Utc>,
}

impl ServiceStats {
    fn new() -> Self {
        ServiceStats {
            is_running: true,
            frames_processed: 0,
            peaks_detected: 0,
            gestures_emitted: 0,
            last_update: Utc::now(),
        }
    }
}

/// How often (in stream time) the per-channel summary is logged.
const SUMMARY_INTERVAL: Duration = Duration::from_millis(100);

/// Per-sample detection loop between a frame source and event consumers.
///
/// Frames arriving while the service is paused or stopped are read and
/// discarded: a missed sample is simply absent from the stream. The
/// service ends when the frame source closes its channel.
pub struct DetectionService {
    engine: DetectionEngine,
    stream_id: Uuid,
    clock: Arc<dyn Clock>,
    frame_receiver: mpsc::Receiver<SampleFrame>,
    event_sender: broadcast::Sender<DetectionEvent>,
    command_receiver: mpsc::Receiver<ServiceCommand>,
    command_sender: mpsc::Sender<ServiceCommand>,
    is_running: bool,
    stats: Arc<Mutex<ServiceStats>>,
    last_summary: Duration,
}

impl DetectionService {
    /// Create a service around a frame source. Processing starts as soon
    /// as frames flow; use [`ServiceCommand::Pause`] to gate it.
    pub fn new(
        config: DetectionConfig,
        frame_receiver: mpsc::Receiver<SampleFrame>,
        clock: Arc<dyn Clock>,
    ) -> MyoResult<Self> {
        let engine = DetectionEngine::new(config)?;
        let (event_sender, _) = broadcast::channel(256);
        let (command_sender, command_receiver) = mpsc::channel(32);

        Ok(DetectionService {
            engine,
            stream_id: Uuid::new_v4(),
            clock,
            frame_receiver,
            event_sender,
            command_receiver,
            command_sender,
            is_running: true,
            stats: Arc::new(Mutex::new(ServiceStats::new())),
            last_summary: Duration::ZERO,
        })
    }

    /// Get a receiver for emitted events.
    pub fn subscribe(&self) -> broadcast::Receiver<DetectionEvent> {
        self.event_sender.subscribe()
    }

    /// Get a sender for control commands.
    pub fn control_handle(&self) -> mpsc::Sender<ServiceCommand> {
        self.command_sender.clone()
    }

    /// Shared view of the session counters.
    pub fn stats_handle(&self) -> Arc<Mutex<ServiceStats>> {
        Arc::clone(&self.stats)
    }

    /// Identity stamped onto every event this service emits.
    pub fn stream_id(&self) -> Uuid {
        self.stream_id
    }

    /// Drive the loop until the frame source closes.
    pub async fn run(mut self) -> MyoResult<()> {
        info!(
            stream = %self.stream_id,
            channels = self.engine.config().channel_count,
            "detection service started"
        );

        loop {
            tokio::select! {
                frame = self.frame_receiver.recv() => {
                    match frame {
                        Some(frame) => {
                            if self.is_running {
                                self.process_frame(frame).await?;
                            }
                        }
                        None => {
                            info!(stream = %self.stream_id, "frame source closed, stopping");
                            break;
                        }
                    }
                }
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command).await?,
                        None => break,
                    }
                }
            }
        }

        Ok(())
    }

    async fn process_frame(&mut self, frame: SampleFrame) -> MyoResult<()> {
        let expected = self.engine.config().channel_count;
        if frame.channel_count() != expected {
            warn!(
                expected,
                got = frame.channel_count(),
                "frame channel count mismatch, dropping frame"
            );
            return Ok(());
        }

        let now = self.clock.now();
        let events = self.engine.tick(&frame, now)?;

        let mut peaks = 0u64;
        let mut gestures = 0u64;
        for kind in events {
            match kind {
                EventKind::Peak(peak) => {
                    peaks += 1;
                    debug!(
                        channel = peak.channel,
                        amplitude = peak.amplitude,
                        z = peak.z_score,
                        "peak detected"
                    );
                }
                EventKind::Gesture(gesture) => {
                    gestures += 1;
                    info!(gesture = %gesture, at = ?now, "gesture detected");
                }
            }
            // Nobody listening is fine; events are fire-and-forget.
            let _ = self.event_sender.send(DetectionEvent {
                stream: self.stream_id,
                at: now,
                kind,
            });
        }

        {
            let mut stats = self.stats.lock().await;
            stats.frames_processed += 1;
            stats.peaks_detected += peaks;
            stats.gestures_emitted += gestures;
            stats.is_running = self.is_running;
            stats.last_update = Utc::now();
        }

        if now.saturating_sub(self.last_summary) >= SUMMARY_INTERVAL {
            self.last_summary = now;
            self.log_summary(now);
        }

        Ok(())
    }

    /// Periodic per-channel baseline summary, roughly ten per second of
    /// stream time.
    fn log_summary(&self, now: Duration) {
        for channel in 0..self.engine.config().channel_count {
            if let Some(stats) = self.engine.channel_stats(channel) {
                debug!(
                    at = ?now,
                    channel,
                    mean = stats.mean(),
                    std_dev = stats.std_dev(),
                    samples = stats.count(),
                    "channel baseline"
                );
            }
        }
    }

    async fn handle_command(&mut self, command: ServiceCommand) -> MyoResult<()> {
        match command {
            ServiceCommand::Start | ServiceCommand::Resume => {
                self.is_running = true;
                info!(stream = %self.stream_id, "detection resumed");
            }
            ServiceCommand::Pause => {
                self.is_running = false;
                info!(stream = %self.stream_id, "detection paused");
            }
            ServiceCommand::Stop => {
                self.is_running = false;
                self.engine.reset();
                let mut stats = self.stats.lock().await;
                *stats = ServiceStats::new();
                stats.is_running = false;
                info!(stream = %self.stream_id, "detection stopped, state discarded");
            }
            ServiceCommand::UpdateConfig(config) => {
                self.engine = DetectionEngine::new(config)?;
                info!(stream = %self.stream_id, "configuration updated, state rebuilt");
            }
        }

        let mut stats = self.stats.lock().await;
        stats.is_running = self.is_running;
        stats.last_update = Utc::now();
        Ok(())
    }
}

/// Wire up a service and run it in a background task.
pub async fn start_detection_service(
    config: DetectionConfig,
    frames: mpsc::Receiver<SampleFrame>,
    clock: Arc<dyn Clock>,
) -> MyoResult<(
    broadcast::Receiver<DetectionEvent>,
    mpsc::Sender<ServiceCommand>,
    Arc<Mutex<ServiceStats>>,
)> {
    let service = DetectionService::new(config, frames, clock)?;
    let events = service.subscribe();
    let control = service.control_handle();
    let stats = service.stats_handle();

    tokio::spawn(async move {
        if let Err(e) = service.run().await {
            warn!("detection service error: {}", e);
        }
    });

    Ok((events, control, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use myo_core::{GestureEvent, ManualClock, MonotonicClock};
    use crate::replay::{spawn_replay, RecordedFrame};
    use tokio::time::timeout;

    fn frame(channels: Vec<f64>, control: f64) -> SampleFrame {
        SampleFrame::new(channels, control).unwrap()
    }

    async fn next_event(
        events: &mut broadcast::Receiver<DetectionEvent>,
    ) -> DetectionEvent {
        timeout(Duration::from_secs(2), events.recv())
            .await
            .expect("timed out waiting for event")
            .expect("event channel closed")
    }

    #[tokio::test]
    async fn test_peak_events_reach_subscribers() {
        let mut config = DetectionConfig::default();
        config.channel_count = 1;

        let (sender, receiver) = mpsc::channel(32);
        let clock = Arc::new(ManualClock::new());
        let (mut events, _control, stats) =
            start_detection_service(config, receiver, clock).await.unwrap();

        for _ in 0..9 {
            sender.send(frame(vec![10.0], 0.5)).await.unwrap();
        }
        sender.send(frame(vec![60.0], 0.5)).await.unwrap();

        let event = next_event(&mut events).await;
        match event.kind {
            EventKind::Peak(peak) => {
                assert_eq!(peak.channel, 0);
                assert_eq!(peak.amplitude, 60.0);
            }
            other => panic!("expected peak, got {:?}", other),
        }

        drop(sender);
        // Give the service a moment to finish the remaining frames.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let stats = stats.lock().await;
        assert_eq!(stats.frames_processed, 10);
        assert_eq!(stats.peaks_detected, 1);
    }

    #[tokio::test]
    async fn test_double_activation_via_replay() {
        let mut config = DetectionConfig::default();
        config.channel_count = 1;
        // Compressed windows so the test runs in under a second; the
        // generous gap window absorbs scheduler jitter.
        config.gesture.hold_time = Duration::from_millis(800);
        config.gesture.double_gap_max = Duration::from_millis(1000);

        let ms = Duration::from_millis;
        let mut recorded = Vec::new();
        // First clench: 0..100ms, release, second clench at 300ms.
        for offset in [0, 25, 50, 75, 100] {
            recorded.push(RecordedFrame { offset: ms(offset), frame: frame(vec![10.0], 0.98) });
        }
        for offset in [150, 175, 200, 225, 250] {
            recorded.push(RecordedFrame { offset: ms(offset), frame: frame(vec![10.0], 0.5) });
        }
        for offset in [300, 325, 350] {
            recorded.push(RecordedFrame { offset: ms(offset), frame: frame(vec![10.0], 0.98) });
        }

        let frames = spawn_replay(recorded);
        let clock = Arc::new(MonotonicClock::new());
        let (mut events, _control, _stats) =
            start_detection_service(config, frames, clock).await.unwrap();

        let event = next_event(&mut events).await;
        assert_eq!(event.kind, EventKind::Gesture(GestureEvent::DoubleActivation));
    }

    #[tokio::test]
    async fn test_paused_service_discards_frames() {
        let mut config = DetectionConfig::default();
        config.channel_count = 1;

        let (sender, receiver) = mpsc::channel(32);
        let clock = Arc::new(ManualClock::new());
        let service = DetectionService::new(config, receiver, clock).unwrap();
        let control = service.control_handle();
        let stats = service.stats_handle();
        tokio::spawn(service.run());

        control.send(ServiceCommand::Pause).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        for _ in 0..5 {
            sender.send(frame(vec![10.0], 0.5)).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(50)).await;

        {
            let stats = stats.lock().await;
            assert_eq!(stats.frames_processed, 0);
            assert!(!stats.is_running);
        }

        control.send(ServiceCommand::Resume).await.unwrap();
        for _ in 0..5 {
            sender.send(frame(vec![10.0], 0.5)).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(50)).await;

        let stats = stats.lock().await;
        assert_eq!(stats.frames_processed, 5);
        assert!(stats.is_running);
    }
}
