//! The sink trait seen by the player.

use super::error::ActuatorError;

/// A destination for single-character actuator commands.
///
/// Implementations must not block in `send`; the write happens later (or
/// never). A sink may lose its connection at any time, so callers treat
/// every error as recoverable.
pub trait ActuatorSink: Send + Sync {
    /// Whether a device is currently attached and usable.
    fn is_connected(&self) -> bool;

    /// Queue `character` for the device.
    ///
    /// Returns [`ActuatorError::NotConnected`] when nothing is attached.
    fn send(&self, character: char) -> Result<(), ActuatorError>;
}

/// Sink for running without a device. Never connected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActuator;

impl ActuatorSink for NoActuator {
    fn is_connected(&self) -> bool {
        false
    }

    fn send(&self, _character: char) -> Result<(), ActuatorError> {
        Err(ActuatorError::NotConnected)
    }
}
