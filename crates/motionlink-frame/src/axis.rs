//! Axis, mode, and command-state types.
//!
//! The platform accepts six degrees of freedom in a fixed wire order.
//! Values travel either as unsigned bytes (midpoint home) or as 32-bit
//! floats (zero home), selected channel-wide by [`Mode`].

/// Number of motion axes.
pub const AXIS_COUNT: usize = 6;

/// Home value per axis in eight-bit mode (range midpoint).
pub const HOME_EIGHT_BIT: u8 = 128;

/// Home value per axis in float mode.
pub const HOME_FLOAT32: f32 = 0.0;

/// One of the six motion degrees of freedom.
///
/// The discriminant order is the wire order: payload bytes are emitted
/// [Sway, Surge, Heave, Pitch, Roll, Yaw].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Sway,
    Surge,
    Heave,
    Pitch,
    Roll,
    Yaw,
}

impl Axis {
    /// All axes in wire order.
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::Sway,
        Axis::Surge,
        Axis::Heave,
        Axis::Pitch,
        Axis::Roll,
        Axis::Yaw,
    ];

    /// Position of this axis in the payload.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable axis name.
    pub fn name(self) -> &'static str {
        match self {
            Axis::Sway => "sway",
            Axis::Surge => "surge",
            Axis::Heave => "heave",
            Axis::Pitch => "pitch",
            Axis::Roll => "roll",
            Axis::Yaw => "yaw",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Channel-wide value representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// One unsigned byte per axis, home at 128.
    EightBit,
    /// One little-endian IEEE-754 f32 per axis, home at 0.0.
    Float32,
}

impl Mode {
    /// Payload length in bytes for one frame in this mode.
    pub fn payload_len(self) -> usize {
        match self {
            Mode::EightBit => AXIS_COUNT,
            Mode::Float32 => AXIS_COUNT * 4,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::EightBit => f.write_str("eight-bit"),
            Mode::Float32 => f.write_str("float32"),
        }
    }
}

/// A single axis value in one of the two representations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisValue {
    EightBit(u8),
    Float32(f32),
}

impl AxisValue {
    /// The mode this value belongs to.
    pub fn mode(self) -> Mode {
        match self {
            AxisValue::EightBit(_) => Mode::EightBit,
            AxisValue::Float32(_) => Mode::Float32,
        }
    }
}

/// The current command values for all six axes.
///
/// Holds exactly one representation at a time; switching modes re-homes
/// every axis.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisState {
    EightBit([u8; AXIS_COUNT]),
    Float32([f32; AXIS_COUNT]),
}

impl AxisState {
    /// A fully homed state in the given mode.
    pub fn homed(mode: Mode) -> Self {
        match mode {
            Mode::EightBit => AxisState::EightBit([HOME_EIGHT_BIT; AXIS_COUNT]),
            Mode::Float32 => AxisState::Float32([HOME_FLOAT32; AXIS_COUNT]),
        }
    }

    /// The representation currently held.
    pub fn mode(&self) -> Mode {
        match self {
            AxisState::EightBit(_) => Mode::EightBit,
            AxisState::Float32(_) => Mode::Float32,
        }
    }

    /// Reset every axis to its mode-specific home value.
    pub fn home(&mut self) {
        *self = AxisState::homed(self.mode());
    }

    /// Write one axis value.
    ///
    /// Returns `false` (leaving the state untouched) when the value's
    /// representation does not match the current mode.
    pub fn set(&mut self, axis: Axis, value: AxisValue) -> bool {
        match (self, value) {
            (AxisState::EightBit(values), AxisValue::EightBit(v)) => {
                values[axis.index()] = v;
                true
            }
            (AxisState::Float32(values), AxisValue::Float32(v)) => {
                values[axis.index()] = v;
                true
            }
            _ => false,
        }
    }

    /// Read one axis value.
    pub fn get(&self, axis: Axis) -> AxisValue {
        match self {
            AxisState::EightBit(values) => AxisValue::EightBit(values[axis.index()]),
            AxisState::Float32(values) => AxisValue::Float32(values[axis.index()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_order_is_stable() {
        let names: Vec<_> = Axis::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names, ["sway", "surge", "heave", "pitch", "roll", "yaw"]);
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn homed_state_matches_mode() {
        assert_eq!(
            AxisState::homed(Mode::EightBit),
            AxisState::EightBit([128; 6])
        );
        assert_eq!(AxisState::homed(Mode::Float32), AxisState::Float32([0.0; 6]));
    }

    #[test]
    fn set_rejects_mismatched_representation() {
        let mut state = AxisState::homed(Mode::EightBit);
        assert!(!state.set(Axis::Pitch, AxisValue::Float32(1.5)));
        assert_eq!(state, AxisState::homed(Mode::EightBit));

        assert!(state.set(Axis::Pitch, AxisValue::EightBit(200)));
        assert_eq!(state.get(Axis::Pitch), AxisValue::EightBit(200));
    }

    #[test]
    fn home_resets_all_axes() {
        let mut state = AxisState::homed(Mode::Float32);
        for axis in Axis::ALL {
            state.set(axis, AxisValue::Float32(3.25));
        }
        state.home();
        assert_eq!(state, AxisState::Float32([0.0; 6]));
    }
}
