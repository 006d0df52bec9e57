//! Actuator errors.

use std::path::PathBuf;

/// Errors from actuator connection and sending.
///
/// None of these are fatal to playback.
#[derive(Debug, thiserror::Error)]
pub enum ActuatorError {
    #[error("Actuator not connected")]
    NotConnected,

    #[error("Failed to open {}: {source}", .device.display())]
    Connect {
        device: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to send {character:?}: {message}")]
    Send { character: char, message: String },

    #[error("Cannot send {0:?}: commands are single ASCII characters")]
    InvalidCharacter(char),

    #[error("Serial devices are not supported on this platform")]
    Unsupported,
}
