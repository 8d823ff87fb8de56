//! In-memory simulated panel.
//!
//! [`SimulatedPanel`] is a [`Transport`] that models a real panel's control
//! firmware entirely in memory: it accepts request frames, tracks its own
//! per-prefix state, and queues reply bytes for `read_byte` to drain. It
//! reproduces the three behaviors the session must classify:
//!
//! - a known code that changes state is acknowledged with the 3-character
//!   prefix frame,
//! - a known code equal to the current state produces no reply at all
//!   (the read loop then times out with an empty buffer),
//! - an unknown code is rejected with the `ER401` error frame.

use std::collections::{HashMap, VecDeque};
use std::io;

use plasma_protocol::{find_code, prefix2, prefix3, unwrap_frame, wrap_frame, ERROR_TOKEN};

use crate::transport::{Transport, TransportError};

/// Panel state the simulator powers up with, matching the real panels'
/// factory defaults: power off, PC VGA input, full-screen mode.
const DEFAULT_STATE: &[&str] = &["POF", "IIS:PC1", "DAM:FULL"];

/// A simulated panel backed by an in-memory reply queue.
#[derive(Debug)]
pub struct SimulatedPanel {
    /// Current code per 2-character state key.
    current: HashMap<String, String>,
    /// Reply bytes waiting to be read.
    reply: VecDeque<u8>,
    /// Every frame written to the panel, in order.
    written: Vec<Vec<u8>>,
    /// When set, `open` fails (models a missing/busy device path).
    fail_open: bool,
    open: bool,
}

impl SimulatedPanel {
    /// Create a simulated panel in the factory-default state.
    pub fn new() -> Self {
        Self::with_current(DEFAULT_STATE)
    }

    /// Create a simulated panel holding the given codes as its current state.
    pub fn with_current(codes: &[&str]) -> Self {
        let current = codes
            .iter()
            .map(|code| (prefix2(code).to_string(), code.to_string()))
            .collect();
        SimulatedPanel {
            current,
            reply: VecDeque::new(),
            written: Vec::new(),
            fail_open: false,
            open: false,
        }
    }

    /// Create a simulated panel whose `open` always fails.
    pub fn failing() -> Self {
        let mut panel = Self::new();
        panel.fail_open = true;
        panel
    }

    /// The code currently held for a 2-character state key.
    pub fn current_code(&self, key: &str) -> Option<&str> {
        self.current.get(key).map(String::as_str)
    }

    /// Every frame written to this panel, in write order.
    pub fn written(&self) -> &[Vec<u8>] {
        &self.written
    }

    /// Number of reply bytes still queued.
    pub fn queued_len(&self) -> usize {
        self.reply.len()
    }

    fn queue_frame(&mut self, payload: &str) {
        self.reply.extend(wrap_frame(payload));
    }
}

impl Default for SimulatedPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for SimulatedPanel {
    fn open(&mut self) -> Result<(), TransportError> {
        if self.fail_open {
            return Err(TransportError::Open {
                port: "sim".to_string(),
                source: serialport::Error::new(
                    serialport::ErrorKind::NoDevice,
                    "simulated open failure",
                ),
            });
        }
        self.open = true;
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        if !self.open {
            return Err(io::Error::from(io::ErrorKind::NotConnected).into());
        }
        self.written.push(frame.to_vec());

        let code = match unwrap_frame(frame) {
            Ok(payload) => payload,
            Err(_) => {
                self.queue_frame(ERROR_TOKEN);
                return Ok(());
            }
        };

        if find_code(code).is_none() {
            self.queue_frame(ERROR_TOKEN);
            return Ok(());
        }

        let key = prefix2(code);
        if self.current.get(key).map(String::as_str) == Some(code) {
            // Already in the requested state: no reply.
            return Ok(());
        }
        let ack = prefix3(code).to_string();
        self.current.insert(key.to_string(), code.to_string());
        self.queue_frame(&ack);
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TransportError> {
        // An empty queue models a read timeout, without sleeping.
        Ok(self.reply.pop_front())
    }
}
