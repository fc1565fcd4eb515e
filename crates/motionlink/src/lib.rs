//! Serial communication link for 6-DOF motion platforms.
//!
//! motionlink frames motion commands (six axes, byte or float
//! representation) to a physical actuator platform over a serial port
//! and decodes the telemetry lines coming back, on two dedicated worker
//! threads per connection.
//!
//! # Crate Structure
//!
//! - [`link`] — Serial transport (port open/close, byte probe, write)
//! - [`frame`] — Marker framing and inbound line accumulation
//! - [`channel`] — The duplex channel: queues, workers, dispatch,
//!   cadence scheduler, lifecycle (behind `channel` feature)

/// Re-export transport types.
pub mod link {
    pub use motionlink_link::*;
}

/// Re-export framing types.
pub mod frame {
    pub use motionlink_frame::*;
}

/// Re-export channel types (requires `channel` feature).
#[cfg(feature = "channel")]
pub mod channel {
    pub use motionlink_channel::*;
}
