//! Marker-delimited 6-DOF command framing and inbound line accumulation.
//!
//! This is the pure codec layer of motionlink: no I/O, no threads.
//! Outbound motion commands are framed with:
//! - A 1-byte start marker (`!`, 0x21)
//! - A fixed-size payload (6 axis bytes, or 6 little-endian f32 values)
//! - A 1-byte end marker (`#`, 0x23)
//!
//! Inbound traffic is a newline/carriage-return terminated ASCII line
//! protocol, accumulated one byte at a time.

pub mod axis;
pub mod codec;
pub mod lines;

pub use axis::{Axis, AxisState, AxisValue, Mode, AXIS_COUNT, HOME_EIGHT_BIT, HOME_FLOAT32};
pub use codec::{encode_frame, frame_len, END_MARKER, START_MARKER};
pub use lines::LineAccumulator;
