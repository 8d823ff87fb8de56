//! Console configuration.
//!
//! Endpoint identifiers and the read timeout are supplied once at
//! construction; nothing is re-read per call.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_read_timeout_ms() -> u64 {
    1000
}

/// Configuration for the control console: one serial endpoint per panel and
/// the per-byte read timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Serial port of the left panel.
    pub left_port: String,
    /// Serial port of the right panel.
    pub right_port: String,
    /// Per-byte read timeout in milliseconds.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            left_port: "COM1".to_string(),
            right_port: "COM2".to_string(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl ConsoleConfig {
    /// The read timeout as a [`Duration`].
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.left_port, "COM1");
        assert_eq!(config.right_port, "COM2");
        assert_eq!(config.read_timeout(), Duration::from_millis(1000));
    }
}
