//! Panel sessions and dual-panel dispatch.
//!
//! This crate owns everything between the operator's action and the wire:
//!
//! - [`Transport`]: a byte-oriented link abstraction with a real serial
//!   implementation ([`SerialTransport`]) and an in-memory simulated panel
//!   ([`SimulatedPanel`]) for testing.
//! - [`PanelSession`]: one panel's authoritative confirmed state and the
//!   send/confirm protocol state machine.
//! - [`Dispatcher`]: fans a single operator action out to the left panel,
//!   the right panel, or both, in deterministic left-then-right order.
//! - [`StatusSink`]: the seam to the presentation layer; sessions push
//!   human-readable status text through it, never the other way around.

mod config;
mod dispatcher;
mod session;
mod sim;
mod transport;

pub use config::*;
pub use dispatcher::*;
pub use session::*;
pub use sim::*;
pub use transport::*;
