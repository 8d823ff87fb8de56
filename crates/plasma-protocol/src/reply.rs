//! Reply classification.
//!
//! After writing a request frame, the host accumulates reply bytes until it
//! sees ETX or a read times out, then classifies the raw buffer. The
//! classification is a pure function so the session state machine can be
//! tested without any I/O.

use crate::catalog::prefix3;
use crate::frame::wrap_frame;

/// Outcome of one request/reply exchange with a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// The panel acknowledged with the 3-character prefix frame; the command
    /// took effect.
    Acknowledged,
    /// The panel sent nothing before the read timed out: it was already in
    /// the requested state. Not an error.
    AlreadySet,
    /// Anything else: the error frame, a partial frame, or garbage. The
    /// command did not take effect.
    Rejected,
}

/// Classify an accumulated reply buffer against the code that was requested.
///
/// Only an exact acknowledgement frame counts as [`Reply::Acknowledged`], and
/// only a fully empty buffer counts as [`Reply::AlreadySet`]; a partial reply
/// followed by a timeout is a rejection.
pub fn classify_reply(buffer: &[u8], code: &str) -> Reply {
    let reply = if buffer.is_empty() {
        Reply::AlreadySet
    } else if buffer == wrap_frame(prefix3(code)).as_slice() {
        Reply::Acknowledged
    } else {
        Reply::Rejected
    };
    log::trace!("classified {} reply byte(s) for {code}: {reply:?}", buffer.len());
    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ERROR_TOKEN;

    #[test]
    fn test_acknowledgement() {
        assert_eq!(classify_reply(b"\x02PON\x03", "PON"), Reply::Acknowledged);
        // Longer codes are acknowledged with their 3-character prefix.
        assert_eq!(
            classify_reply(b"\x02IIS\x03", "IIS:PC1"),
            Reply::Acknowledged
        );
        assert_eq!(
            classify_reply(b"\x02DAM\x03", "DAM:ZOOM"),
            Reply::Acknowledged
        );
    }

    #[test]
    fn test_empty_buffer_means_already_set() {
        assert_eq!(classify_reply(b"", "PON"), Reply::AlreadySet);
    }

    #[test]
    fn test_error_frame_is_rejected() {
        let error_frame = wrap_frame(ERROR_TOKEN);
        assert_eq!(classify_reply(&error_frame, "PON"), Reply::Rejected);
    }

    #[test]
    fn test_mismatched_ack_is_rejected() {
        // Acknowledgement for a different code.
        assert_eq!(classify_reply(b"\x02POF\x03", "PON"), Reply::Rejected);
        // Full code echoed back instead of the prefix.
        assert_eq!(classify_reply(b"\x02IIS:PC1\x03", "IIS:PC1"), Reply::Rejected);
    }

    #[test]
    fn test_partial_frame_is_rejected() {
        assert_eq!(classify_reply(b"\x02PO", "PON"), Reply::Rejected);
        assert_eq!(classify_reply(b"\x02", "PON"), Reply::Rejected);
    }
}
