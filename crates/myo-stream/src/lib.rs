//! Myo-Stream: glue from frame sources to event consumers
//!
//! The detection loop as a tokio service: frames in over `mpsc`, typed
//! events out over `broadcast`, control over a command channel. Live
//! simulation and recorded replay feed the same seam.

pub mod replay;
pub mod service;

pub use replay::{spawn_replay, RecordedFrame};
pub use service::{
    start_detection_service, DetectionService, ServiceCommand, ServiceStats,
};
