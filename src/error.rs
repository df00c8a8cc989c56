//! # Error Types
//!
//! Custom error types for SpaceMouse Bridge using `thiserror`.

use thiserror::Error;

use crate::sensor::channel::Channel;

/// Main error type for SpaceMouse Bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A single ADC read failed. Always fatal: the sample cannot be substituted.
    #[error("ADC read failed on channel {channel}: {reason}")]
    Adc { channel: Channel, reason: String },

    /// ADC adapter could not be initialised
    #[error("ADC initialisation failed: {0}")]
    AdcInit(String),

    /// Calibration captured a centerpoint at a raw-range boundary
    #[error("degenerate centerpoint {center} on channel {channel} (raw range 0-{raw_max}); are the knobs at rest?")]
    DegenerateCenter {
        channel: Channel,
        center: u16,
        raw_max: u16,
    },

    /// HID transport errors (open or non-recoverable write failure)
    #[error("HID transport error: {0}")]
    Transport(String),

    /// Malformed HID report
    #[error("HID report error: {0}")]
    Report(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Returns true for hardware faults that must halt the bridge.
    ///
    /// Configuration faults are reported separately so the operator knows
    /// the fix is in the config file or the knob positions, not the wiring.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BridgeError::Adc { .. }
                | BridgeError::AdcInit(_)
                | BridgeError::Transport(_)
                | BridgeError::Io(_)
        )
    }
}

/// Result type alias for SpaceMouse Bridge
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn test_hardware_faults_are_fatal() {
        let err = BridgeError::Adc {
            channel: Channel::Bx,
            reason: "EIO".to_string(),
        };
        assert!(err.is_fatal());
        assert!(BridgeError::Transport("gone".to_string()).is_fatal());
    }

    #[test]
    fn test_config_faults_are_not_fatal() {
        let err = BridgeError::DegenerateCenter {
            channel: Channel::Ay,
            center: 0,
            raw_max: 8191,
        };
        assert!(!err.is_fatal());
        assert!(!BridgeError::Config(toml::de::Error::custom("bad")).is_fatal());
    }

    #[test]
    fn test_error_messages_name_the_channel() {
        let err = BridgeError::Adc {
            channel: Channel::Dy,
            reason: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "ADC read failed on channel D.y: timeout");

        let err = BridgeError::DegenerateCenter {
            channel: Channel::Cx,
            center: 8191,
            raw_max: 8191,
        };
        assert!(err.to_string().contains("C.x"));
        assert!(err.to_string().contains("8191"));
    }
}
