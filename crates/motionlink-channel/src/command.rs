use std::time::{Duration, Instant};

use bytes::{Bytes, BytesMut};
use motionlink_frame::{encode_frame, frame_len, Axis, AxisState, AxisValue, Mode};
use tracing::debug;

/// Reference output cadence: 20 ms (50 Hz).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(20);

/// Owns the current 6-DOF command values and the fixed-cadence gate
/// that turns them into outbound frames.
///
/// Commands are re-sent continuously at the cadence, so axis updates
/// between ticks need no transactional grouping: a tick that observes
/// a partially updated state is corrected one interval later.
pub struct CommandSource {
    axes: AxisState,
    interval: Duration,
    next_send: Option<Instant>,
}

impl CommandSource {
    pub fn new(mode: Mode, interval: Duration) -> Self {
        Self {
            axes: AxisState::homed(mode),
            interval,
            next_send: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.axes.mode()
    }

    pub fn axes(&self) -> &AxisState {
        &self.axes
    }

    /// Write one axis value. Returns `false` when the value's
    /// representation does not match the current mode (the state is
    /// left untouched).
    pub fn set_axis(&mut self, axis: Axis, value: AxisValue) -> bool {
        self.axes.set(axis, value)
    }

    /// Switch value representation. A mode change re-homes every axis;
    /// setting the current mode again is a no-op.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.axes.mode() != mode {
            debug!(%mode, "switching mode, re-homing all axes");
            self.axes = AxisState::homed(mode);
        }
    }

    /// Reset every axis to its home value and encode one homed frame
    /// immediately, outside the cadence. Used at startup and shutdown.
    pub fn home(&mut self) -> Bytes {
        self.axes.home();
        self.encode()
    }

    /// Cadence gate: encode the current values when the interval has
    /// elapsed (the first call always fires), otherwise `None`.
    pub fn tick(&mut self, now: Instant) -> Option<Bytes> {
        match self.next_send {
            Some(deadline) if now < deadline => None,
            _ => {
                self.next_send = Some(now + self.interval);
                Some(self.encode())
            }
        }
    }

    fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(frame_len(self.axes.mode()));
        encode_frame(&self.axes, &mut buf);
        buf.freeze()
    }
}
