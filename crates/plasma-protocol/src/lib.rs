//! Plasma Panel Serial Control Protocol
//!
//! This crate provides types and utilities for communicating with plasma
//! display panels over their serial control interface. The protocol exchanges
//! short ASCII command tokens wrapped in STX/ETX framing.
//!
//! # Protocol Overview
//!
//! Each frame is `STX (0x02)` + ASCII payload + `ETX (0x03)`. Payloads are:
//!
//! - **Requests** (host → panel): a full command code, e.g. `PON`, `IIS:PC1`
//! - **Acknowledgements** (panel → host): the first three characters of the
//!   requested code, e.g. `PON`, `IIS`
//! - **Rejections** (panel → host): the literal error token `ER401`
//!
//! A panel that is already in the requested state sends nothing at all; the
//! host detects this as a read timeout with an empty receive buffer and treats
//! it as success (see [`Reply::AlreadySet`]).
//!
//! # Example
//!
//! ```rust
//! use plasma_protocol::{classify_reply, wrap_frame, Category, Reply};
//!
//! let code = Category::Power.code("On").unwrap();
//! let request = wrap_frame(code);
//! assert_eq!(request, b"\x02PON\x03");
//!
//! // The panel acknowledged with the 3-character prefix frame.
//! assert_eq!(classify_reply(b"\x02PON\x03", code), Reply::Acknowledged);
//! ```

mod catalog;
mod error;
mod frame;
mod reply;

pub use catalog::*;
pub use error::*;
pub use frame::*;
pub use reply::*;
