//! Serial transport layer for the motion platform link.
//!
//! Owns the physical connection: open/close, 8-N-1 configuration,
//! non-blocking byte probes, best-effort writes, and port enumeration.
//! This is the lowest layer of motionlink and the only crate that
//! touches `serialport`. Everything above it works against the
//! [`ByteLink`] seam, so loopbacks and tests can stand in for real
//! hardware.

pub mod error;
pub mod serial;
pub mod traits;

pub use error::{LinkError, Result};
pub use serial::{enumerate, LinkConfig, PortInfo, SerialLink};
pub use traits::ByteLink;
