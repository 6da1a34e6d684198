//! Error handling for the myo crates
//!
//! The detectors themselves never fail; errors exist only at the seams
//! around them (configuration, channel registration, simulation setup,
//! service wiring).

use core::fmt;

/// Result type alias for myo operations
pub type MyoResult<T> = Result<T, MyoError>;

/// Error type shared by all myo crates
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MyoError {
    /// Channel index outside the registered range
    UnknownChannel {
        /// Requested channel index
        channel: usize,
        /// Number of registered channels
        channel_count: usize,
    },

    /// Frame or sample payload is structurally invalid
    InvalidFrame {
        /// Description of the problem
        reason: String,
    },

    /// Detection configuration failed validation
    ConfigurationError {
        /// Description of the problem
        message: String,
    },

    /// Simulation setup or generation failure
    SimulationError {
        /// Description of the problem
        message: String,
    },

    /// Streaming service wiring failure
    StreamError {
        /// Description of the problem
        message: String,
    },
}

impl fmt::Display for MyoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MyoError::UnknownChannel { channel, channel_count } => {
                write!(f, "Unknown channel {}: {} channels registered",
                       channel, channel_count)
            }
            MyoError::InvalidFrame { reason } => {
                write!(f, "Invalid frame: {}", reason)
            }
            MyoError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            MyoError::SimulationError { message } => {
                write!(f, "Simulation error: {}", message)
            }
            MyoError::StreamError { message } => {
                write!(f, "Stream error: {}", message)
            }
        }
    }
}

impl std::error::Error for MyoError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MyoError::UnknownChannel {
            channel: 7,
            channel_count: 4,
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown channel"));
        assert!(display.contains("7"));
        assert!(display.contains("4"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = MyoError::ConfigurationError {
            message: "test".to_string(),
        };
        let error2 = MyoError::ConfigurationError {
            message: "test".to_string(),
        };
        assert_eq!(error1, error2);
    }
}
