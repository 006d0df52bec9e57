//! Serial-port actuator.
//!
//! Writes are handed to a per-connection writer thread over a channel, so
//! `send` returns immediately. A failed write marks the connection broken;
//! later sends report `NotConnected` until the application reconnects.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use super::device::open_device;
use super::error::ActuatorError;
use super::sink::ActuatorSink;
use crate::braille::CLEAR_SENTINEL;

/// Baud rate agreed with the actuator firmware.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Where and how to open the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    pub device: PathBuf,
    pub baud_rate: u32,
}

impl SerialSettings {
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// Description of an open connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Device path or transport label
    pub device: String,
    /// Baud rate, if the transport has one
    pub baud_rate: Option<u32>,
}

/// A write that did not reach the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendFailure {
    pub character: char,
    pub message: String,
}

struct Connection {
    info: ConnectionInfo,
    tx: Sender<u8>,
    healthy: Arc<AtomicBool>,
    worker: JoinHandle<()>,
}

impl Connection {
    fn is_usable(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

/// Actuator attached over a serial-like byte stream.
///
/// Shared between the application (which connects and disconnects) and
/// the player (which sends), typically behind an `Arc`.
#[derive(Default)]
pub struct SerialActuator {
    connection: Mutex<Option<Connection>>,
    failures: Arc<Mutex<Vec<SendFailure>>>,
}

impl SerialActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the device and synchronize it to the cleared state.
    ///
    /// An existing connection is closed first. On error the actuator stays
    /// disconnected.
    pub fn connect(&self, settings: &SerialSettings) -> Result<ConnectionInfo, ActuatorError> {
        self.disconnect();
        let file = open_device(&settings.device, settings.baud_rate)?;
        let info = ConnectionInfo {
            device: settings.device.display().to_string(),
            baud_rate: Some(settings.baud_rate),
        };
        Ok(self.attach(Box::new(file), info))
    }

    /// Attach an already-open transport.
    ///
    /// Like [`connect`](Self::connect), the clear sentinel is queued first.
    /// A previous connection is swapped out under the same lock and closed
    /// afterwards.
    pub fn attach(&self, writer: Box<dyn Write + Send>, info: ConnectionInfo) -> ConnectionInfo {
        let (tx, rx) = mpsc::channel();
        let healthy = Arc::new(AtomicBool::new(true));
        let worker = {
            let healthy = Arc::clone(&healthy);
            let failures = Arc::clone(&self.failures);
            let device = info.device.clone();
            thread::spawn(move || writer_loop(rx, writer, healthy, failures, device))
        };

        // The receiver is alive until we drop `tx`, so this cannot fail.
        let _ = tx.send(CLEAR_SENTINEL as u8);

        let previous = self.lock_connection().replace(Connection {
            info: info.clone(),
            tx,
            healthy,
            worker,
        });
        if let Some(previous) = previous {
            close(previous);
        }

        info!(device = %info.device, baud = ?info.baud_rate, "actuator connected");
        info
    }

    /// Clear the device and release the connection.
    ///
    /// The clear sentinel is best-effort; the connection is released even
    /// if it cannot be written. Queued writes are flushed before this
    /// returns. Returns false if nothing was connected.
    pub fn disconnect(&self) -> bool {
        // Bound first so the guard is released before joining the writer
        let taken = self.lock_connection().take();
        match taken {
            Some(connection) => {
                close(connection);
                true
            }
            None => false,
        }
    }

    /// Info for the current connection, if any (broken or not).
    pub fn connection_info(&self) -> Option<ConnectionInfo> {
        self.lock_connection().as_ref().map(|c| c.info.clone())
    }

    /// Drain write failures reported since the last call.
    pub fn take_failures(&self) -> Vec<SendFailure> {
        match self.failures.lock() {
            Ok(mut failures) => std::mem::take(&mut *failures),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    fn lock_connection(&self) -> MutexGuard<'_, Option<Connection>> {
        // A panic while holding the lock cannot leave the Option half-written.
        self.connection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ActuatorSink for SerialActuator {
    fn is_connected(&self) -> bool {
        self.lock_connection()
            .as_ref()
            .is_some_and(Connection::is_usable)
    }

    fn send(&self, character: char) -> Result<(), ActuatorError> {
        if !character.is_ascii() {
            return Err(ActuatorError::InvalidCharacter(character));
        }

        let guard = self.lock_connection();
        let connection = match guard.as_ref() {
            Some(c) if c.is_usable() => c,
            _ => return Err(ActuatorError::NotConnected),
        };

        connection.tx.send(character as u8).map_err(|_| {
            connection.healthy.store(false, Ordering::SeqCst);
            ActuatorError::Send {
                character,
                message: "writer stopped".to_string(),
            }
        })
    }
}

impl Drop for SerialActuator {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Queue the clear sentinel, then stop and join the writer.
fn close(connection: Connection) {
    let Connection {
        info, tx, worker, ..
    } = connection;
    if tx.send(CLEAR_SENTINEL as u8).is_err() {
        debug!(device = %info.device, "could not queue clear before disconnect");
    }
    drop(tx);
    if worker.join().is_err() {
        warn!(device = %info.device, "actuator writer panicked");
    }
    info!(device = %info.device, "actuator disconnected");
}

/// Write queued bytes until the channel closes or a write fails.
///
/// After a failure the remaining queue is dropped and the connection is
/// marked unusable.
fn writer_loop(
    rx: Receiver<u8>,
    mut writer: Box<dyn Write + Send>,
    healthy: Arc<AtomicBool>,
    failures: Arc<Mutex<Vec<SendFailure>>>,
    device: String,
) {
    while let Ok(byte) = rx.recv() {
        let result = writer.write_all(&[byte]).and_then(|_| writer.flush());
        if let Err(e) = result {
            let character = byte as char;
            warn!(%device, ?character, error = %e, "actuator write failed");
            let failure = SendFailure {
                character,
                message: e.to_string(),
            };
            match failures.lock() {
                Ok(mut f) => f.push(failure),
                Err(poisoned) => poisoned.into_inner().push(failure),
            }
            // Recorded before flipping the flag so observers of `is_connected`
            // always find the failure.
            healthy.store(false, Ordering::SeqCst);
            break;
        }
    }
}
