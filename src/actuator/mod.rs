//! Actuator output.
//!
//! The player forwards each shown character to an [`ActuatorSink`]. Sinks
//! never block or fail playback: writes are queued and errors are reported
//! out of band.
//!
//! - `sink`: the `ActuatorSink` trait and the no-op `NoActuator`
//! - `serial`: a serial-port sink with a background writer thread
//! - `device`: opening and configuring serial devices

mod device;
mod error;
mod serial;
mod sink;

pub use error::ActuatorError;
pub use serial::{ConnectionInfo, SendFailure, SerialActuator, SerialSettings, DEFAULT_BAUD_RATE};
pub use sink::{ActuatorSink, NoActuator};
