//! Frame encoding/decoding utilities.
//!
//! The panels speak a simple framing format where each frame is an ASCII
//! payload wrapped in STX/ETX delimiter bytes:
//!
//! ```text
//! +------+------------------+------+
//! | 0x02 | payload (ASCII)  | 0x03 |
//! +------+------------------+------+
//! ```
//!
//! Frames are exchanged one at a time: the host writes one request frame and
//! then reads bytes until it either sees ETX or a read times out.

use bytes::BytesMut;

use crate::error::ProtocolError;

/// Start-of-frame delimiter.
pub const STX: u8 = 0x02;

/// End-of-frame delimiter.
pub const ETX: u8 = 0x03;

/// Longest payload the panels are known to exchange.
///
/// Command codes are 3-7 characters and the error token is 5, so this leaves
/// comfortable headroom for catalog extensions.
pub const MAX_PAYLOAD_LEN: usize = 16;

/// Error token sent by a panel that rejects a command.
pub const ERROR_TOKEN: &str = "ER401";

/// Wrap a payload in STX/ETX delimiters for transmission.
pub fn wrap_frame(payload: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(payload.len() + 2);
    buf.push(STX);
    buf.extend_from_slice(payload.as_bytes());
    buf.push(ETX);
    buf
}

/// Strip the STX/ETX delimiters from a frame and return the payload.
pub fn unwrap_frame(frame: &[u8]) -> Result<&str, ProtocolError> {
    if frame.len() < 2 {
        return Err(ProtocolError::FrameTooShort {
            expected: 2,
            actual: frame.len(),
        });
    }
    if frame[0] != STX || frame[frame.len() - 1] != ETX {
        return Err(ProtocolError::BadDelimiters);
    }
    let payload = &frame[1..frame.len() - 1];
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(ProtocolError::PayloadTooLong {
            max: MAX_PAYLOAD_LEN,
            actual: payload.len(),
        });
    }
    if !payload.is_ascii() {
        return Err(ProtocolError::InvalidPayload);
    }
    std::str::from_utf8(payload).map_err(|_| ProtocolError::InvalidPayload)
}

/// Byte-at-a-time accumulator for a panel reply.
///
/// The session read loop feeds one byte per bounded read into the reader and
/// stops when the accumulated buffer ends with ETX ([`push`](Self::push)
/// returns `true`) or a read times out. The raw buffer, complete or not, is
/// then handed to [`classify_reply`](crate::classify_reply).
#[derive(Debug, Default)]
pub struct FrameReader {
    buffer: BytesMut,
}

impl FrameReader {
    /// Create a new, empty frame reader.
    pub fn new() -> Self {
        FrameReader {
            buffer: BytesMut::with_capacity(MAX_PAYLOAD_LEN + 2),
        }
    }

    /// Append one received byte. Returns `true` once the buffer ends with ETX.
    pub fn push(&mut self, byte: u8) -> bool {
        self.buffer.extend_from_slice(&[byte]);
        byte == ETX
    }

    /// Whether the accumulated buffer ends with a frame delimiter.
    pub fn is_complete(&self) -> bool {
        self.buffer.last() == Some(&ETX)
    }

    /// The raw accumulated bytes.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Take the accumulated bytes out of the reader, leaving it empty.
    pub fn take(&mut self) -> Vec<u8> {
        self.buffer.split().to_vec()
    }
}
