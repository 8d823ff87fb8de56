//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when working with panel control frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame is too short to hold the delimiters and a payload.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Frame does not start with STX or does not end with ETX.
    #[error("frame missing STX/ETX delimiters")]
    BadDelimiters,

    /// Payload exceeds the longest token the panels exchange.
    #[error("payload too long: maximum {max} bytes, got {actual}")]
    PayloadTooLong {
        /// Maximum allowed payload length.
        max: usize,
        /// Actual payload length.
        actual: usize,
    },

    /// Payload contains non-ASCII bytes.
    #[error("invalid (non-ASCII) payload")]
    InvalidPayload,
}
