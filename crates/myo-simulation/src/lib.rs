//! Myo-Simulation: scripted activation streams for development and tests
//!
//! Generates the sample frames a live acquisition loop would produce,
//! with seeded noise for reproducibility. No hardware, no transport.

pub mod frame_stream;
pub mod patterns;
pub mod simulator;

pub use frame_stream::spawn_frame_stream;
pub use patterns::ActivationPattern;
pub use simulator::{SignalSimulator, SimulatorConfig};
