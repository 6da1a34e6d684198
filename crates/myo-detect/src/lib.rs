//! Myo-Detect: Online event detection for biosignal streams
//!
//! Per-sample statistical peak detection (Welford running statistics with
//! a z-score judgment) and the clench gesture state machine, plus the
//! normalization and configuration shared by both paths. Everything here
//! is synchronous, allocation-free on the per-sample path, and driven one
//! value at a time.

pub mod config;
pub mod engine;
pub mod gesture;
pub mod normalize;
pub mod peak;
pub mod running_stats;

pub use config::DetectionConfig;
pub use engine::DetectionEngine;
pub use gesture::{GestureClassifier, GestureConfig, GesturePhase};
pub use normalize::{Normalizer, NormalizerConfig};
pub use peak::PeakDetector;
pub use running_stats::{PeakConfig, RunningStats};
