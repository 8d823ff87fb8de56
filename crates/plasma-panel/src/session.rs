//! Panel session: the send/confirm protocol state machine.
//!
//! A [`PanelSession`] owns one transport and the authoritative confirmed
//! state for one panel. Every operator action flows through
//! [`send`](PanelSession::send): frame the command, write it, accumulate the
//! reply until ETX or timeout, classify, and either commit the new state or
//! report an error through the [`StatusSink`]. Protocol-level disagreement is
//! a reportable condition, never an `Err`; nothing propagates past the
//! session boundary.

use std::collections::HashMap;

use plasma_protocol::{classify_reply, wrap_frame, Category, FrameReader, Reply};
use tracing::{debug, trace, warn};

use crate::transport::{Transport, TransportError};

/// Which physical panel a session controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    /// The left panel.
    Left,
    /// The right panel.
    Right,
}

impl PanelId {
    /// Get the panel name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelId::Left => "left",
            PanelId::Right => "right",
        }
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives human-readable status text per panel.
///
/// Implemented by the presentation layer; a session calls it at most once per
/// protocol send, with either a rendered state block or a two-line error
/// message.
pub trait StatusSink {
    /// Replace the status text shown for one panel.
    fn set_status(&self, panel: PanelId, text: &str);
}

/// How one protocol send resolved. Returned for observability; callers that
/// only care about reporting can ignore it, the sink has already been told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The panel acknowledged; confirmed state was updated.
    Acknowledged,
    /// The panel was already in the requested state; nothing changed and
    /// nothing was reported.
    AlreadySet,
    /// The panel rejected or disagreed with the command; reported, state
    /// unchanged.
    Rejected,
    /// The link could not be opened; reported, state unchanged.
    OpenFailed,
}

/// One panel's session: transport, confirmed state, and the send protocol.
pub struct PanelSession<T: Transport> {
    id: PanelId,
    name: String,
    transport: T,
    /// Last *acknowledged* code per 2-character state key. Only a successful
    /// acknowledgement mutates this; a sent-but-unconfirmed command does not.
    confirmed: HashMap<&'static str, &'static str>,
}

impl<T: Transport> PanelSession<T> {
    /// Create a session. `name` is the endpoint identifier used in operator
    /// error text (e.g. the serial port name).
    ///
    /// The confirmed state starts from the assumed panel snapshot: power on,
    /// PC VGA input, full-screen mode.
    pub fn new(id: PanelId, name: impl Into<String>, transport: T) -> Self {
        let mut confirmed = HashMap::new();
        for (category, value) in [
            (Category::Power, "On"),
            (Category::Source, "PC VGA"),
            (Category::Mode, "Full"),
        ] {
            if let Some(code) = category.code(value) {
                confirmed.insert(category.state_key(), code);
            }
        }
        PanelSession {
            id,
            name: name.into(),
            transport,
            confirmed,
        }
    }

    /// The panel this session controls.
    pub fn id(&self) -> PanelId {
        self.id
    }

    /// The endpoint identifier used in error text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the transport (test hook for simulated panels).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The confirmed code for a category, if any.
    pub fn confirmed_code(&self, category: Category) -> Option<&'static str> {
        self.confirmed.get(category.state_key()).copied()
    }

    /// The operator-facing value label currently confirmed for a category.
    ///
    /// The confirmed map is seeded at construction and only ever updated with
    /// catalog codes, so every category always resolves.
    pub fn confirmed_value(&self, category: Category) -> &'static str {
        self.confirmed
            .get(category.state_key())
            .and_then(|code| category.value_for(code))
            .unwrap_or_else(|| panic!("no confirmed state for category {category}"))
    }

    /// Render the full confirmed state, one `"<Category>: <Value>"` line per
    /// category.
    pub fn render_state(&self) -> String {
        let mut text = String::new();
        for category in Category::ALL {
            text.push_str(category.as_str());
            text.push_str(": ");
            text.push_str(self.confirmed_value(category));
            text.push('\n');
        }
        text
    }

    /// Send one operator-selected (category, value) command.
    ///
    /// After a `Power`/`On` send the session always re-issues its tracked
    /// Source and Mode values, in that order, to restore downstream settings
    /// after a power cycle. The cascade fires after any completion of the
    /// power send, including rejection and open failure, matching the panels'
    /// established operating procedure.
    pub fn send(&mut self, category: Category, value: &str, sink: &dyn StatusSink) -> SendOutcome {
        let outcome = self.send_one(category, value, sink);
        if category == Category::Power && value == "On" {
            let source = self.confirmed_value(Category::Source);
            let mode = self.confirmed_value(Category::Mode);
            self.send_one(Category::Source, source, sink);
            self.send_one(Category::Mode, mode, sink);
        }
        outcome
    }

    /// One framed request/reply exchange, without the power-on cascade.
    ///
    /// Panics if the (category, value) pair is not in the catalog: that is a
    /// programmer/configuration error, not an operator-recoverable one.
    fn send_one(&mut self, category: Category, value: &str, sink: &dyn StatusSink) -> SendOutcome {
        let code = category
            .code(value)
            .unwrap_or_else(|| panic!("unknown selection {category}:{value}"));

        if let Err(err) = self.transport.open() {
            warn!(panel = %self.id, error = %err, "failed to open link");
            sink.set_status(self.id, &format!("Error Opening\n{}", self.name));
            return SendOutcome::OpenFailed;
        }

        trace!(panel = %self.id, code, "sending command frame");
        let buffer = match self.exchange(code) {
            Ok(buffer) => buffer,
            Err(err) => {
                warn!(panel = %self.id, code, error = %err, "link error during send");
                sink.set_status(self.id, &self.error_setting_text(category, value));
                return SendOutcome::Rejected;
            }
        };

        match classify_reply(&buffer, code) {
            Reply::Acknowledged => {
                debug!(panel = %self.id, code, "command acknowledged");
                self.confirmed.insert(category.state_key(), code);
                sink.set_status(self.id, &self.render_state());
                SendOutcome::Acknowledged
            }
            Reply::AlreadySet => {
                // No reply: the panel is already in the requested state.
                trace!(panel = %self.id, code, "no reply, already set");
                SendOutcome::AlreadySet
            }
            Reply::Rejected => {
                warn!(panel = %self.id, code, reply = ?buffer, "command rejected");
                sink.set_status(self.id, &self.error_setting_text(category, value));
                SendOutcome::Rejected
            }
        }
    }

    /// Write the request frame and accumulate the reply until ETX or timeout.
    fn exchange(&mut self, code: &str) -> Result<Vec<u8>, TransportError> {
        self.transport.write_frame(&wrap_frame(code))?;
        let mut reader = FrameReader::new();
        loop {
            match self.transport.read_byte()? {
                Some(byte) => {
                    if reader.push(byte) {
                        break;
                    }
                }
                // Each byte read is bounded by the transport timeout; a
                // timeout ends the exchange with whatever accumulated.
                None => break,
            }
        }
        Ok(reader.take())
    }

    fn error_setting_text(&self, category: Category, value: &str) -> String {
        format!("Error Setting\n{category} to {value}")
    }
}
