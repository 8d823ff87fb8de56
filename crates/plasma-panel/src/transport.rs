//! Byte-oriented link transports.
//!
//! A [`Transport`] is the session's only view of the wire: write one framed
//! command, then read reply bytes one at a time with a bounded wait. The real
//! implementation wraps a serial port; tests use the in-memory
//! [`SimulatedPanel`](crate::SimulatedPanel).

use std::io::{self, Read, Write};
use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying link could not be acquired (device path missing/busy).
    #[error("failed to open {port}: {source}")]
    Open {
        /// Endpoint identifier that failed to open.
        port: String,
        /// Underlying serial error.
        #[source]
        source: serialport::Error,
    },

    /// I/O failure on an already-open link.
    #[error("link I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A byte-oriented link to one panel.
///
/// Each session owns its transport exclusively; nothing is shared across
/// panels.
pub trait Transport {
    /// Acquire the underlying link. Idempotent: opening an already-open
    /// transport is a no-op returning success.
    fn open(&mut self) -> Result<(), TransportError>;

    /// Write one complete frame.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError>;

    /// Read one byte, waiting at most the configured timeout.
    ///
    /// Returns `Ok(None)` on timeout; never blocks indefinitely.
    fn read_byte(&mut self) -> Result<Option<u8>, TransportError>;
}

/// Baud rate the panel control ports run at.
const BAUD_RATE: u32 = 9600;

/// A [`Transport`] over a real serial port.
///
/// The port is opened lazily on first use with the read timeout supplied at
/// construction.
pub struct SerialTransport {
    port_name: String,
    read_timeout: Duration,
    port: Option<Box<dyn serialport::SerialPort>>,
}

impl SerialTransport {
    /// Create a transport for the given port name. The port itself is not
    /// touched until [`open`](Transport::open) is called.
    pub fn new(port_name: impl Into<String>, read_timeout: Duration) -> Self {
        SerialTransport {
            port_name: port_name.into(),
            read_timeout,
            port: None,
        }
    }

    /// The configured endpoint identifier.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    fn port_mut(&mut self) -> Result<&mut Box<dyn serialport::SerialPort>, TransportError> {
        self.port
            .as_mut()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotConnected).into())
    }
}

impl Transport for SerialTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        if self.port.is_some() {
            return Ok(());
        }
        let port = serialport::new(&self.port_name, BAUD_RATE)
            .timeout(self.read_timeout)
            .open()
            .map_err(|source| TransportError::Open {
                port: self.port_name.clone(),
                source,
            })?;
        self.port = Some(port);
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        let port = self.port_mut()?;
        port.write_all(frame)?;
        port.flush()?;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TransportError> {
        let port = self.port_mut()?;
        let mut buf = [0u8; 1];
        match port.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
