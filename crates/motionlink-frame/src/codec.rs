use bytes::{BufMut, BytesMut};

use crate::axis::{AxisState, Mode};

/// Frame start marker: `!`.
pub const START_MARKER: u8 = 0x21;

/// Frame end marker: `#`.
pub const END_MARKER: u8 = 0x23;

/// Total wire size of one frame in the given mode (markers + payload).
pub fn frame_len(mode: Mode) -> usize {
    mode.payload_len() + 2
}

/// Encode the current axis values as one complete frame.
///
/// Wire format:
/// ```text
/// ┌────────────┬───────────────────────────────┬────────────┐
/// │ Start (1B) │ Payload                       │ End (1B)   │
/// │ 0x21 "!"   │ 6 bytes, or 6 × f32 LE (24B)  │ 0x23 "#"   │
/// └────────────┴───────────────────────────────┴────────────┘
/// ```
/// Payload axis order is [Sway, Surge, Heave, Pitch, Roll, Yaw]. There
/// is no checksum or length field; frame boundaries are markers only.
pub fn encode_frame(state: &AxisState, dst: &mut BytesMut) {
    dst.reserve(frame_len(state.mode()));
    dst.put_u8(START_MARKER);
    match state {
        AxisState::EightBit(values) => dst.put_slice(values),
        AxisState::Float32(values) => {
            for value in values {
                dst.put_f32_le(*value);
            }
        }
    }
    dst.put_u8(END_MARKER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, AxisValue};

    fn encoded(state: &AxisState) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_frame(state, &mut buf);
        buf.to_vec()
    }

    #[test]
    fn eight_bit_frame_is_marker_payload_marker() {
        let mut state = AxisState::homed(Mode::EightBit);
        for (axis, value) in Axis::ALL.into_iter().zip([10u8, 20, 30, 40, 50, 60]) {
            assert!(state.set(axis, AxisValue::EightBit(value)));
        }

        assert_eq!(
            encoded(&state),
            [0x21, 0x0A, 0x14, 0x1E, 0x28, 0x32, 0x3C, 0x23]
        );
    }

    #[test]
    fn eight_bit_round_trip_recovers_values() {
        let values = [0u8, 1, 127, 128, 254, 255];
        let mut state = AxisState::homed(Mode::EightBit);
        for (axis, value) in Axis::ALL.into_iter().zip(values) {
            state.set(axis, AxisValue::EightBit(value));
        }

        let frame = encoded(&state);
        assert_eq!(frame.len(), frame_len(Mode::EightBit));
        assert_eq!(frame[0], START_MARKER);
        assert_eq!(*frame.last().expect("frame is non-empty"), END_MARKER);
        assert_eq!(&frame[1..7], &values);
    }

    #[test]
    fn float_round_trip_is_bit_identical() {
        let values = [1.5f32, -2.25, 0.0, f32::MIN_POSITIVE, 1e10, -0.125];
        let mut state = AxisState::homed(Mode::Float32);
        for (axis, value) in Axis::ALL.into_iter().zip(values) {
            state.set(axis, AxisValue::Float32(value));
        }

        let frame = encoded(&state);
        assert_eq!(frame.len(), frame_len(Mode::Float32));
        assert_eq!(frame[0], START_MARKER);
        assert_eq!(frame[25], END_MARKER);

        // Device-side decode: 4-byte little-endian chunks in axis order.
        for (i, expected) in values.iter().enumerate() {
            let start = 1 + i * 4;
            let bytes: [u8; 4] = frame[start..start + 4]
                .try_into()
                .expect("payload chunk is 4 bytes");
            let decoded = f32::from_le_bytes(bytes);
            assert_eq!(decoded.to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn homed_float_frame_is_all_zero_payload() {
        let frame = encoded(&AxisState::homed(Mode::Float32));
        assert_eq!(frame.len(), 26);
        assert!(frame[1..25].iter().all(|&b| b == 0));
    }

    #[test]
    fn markers_match_ascii_punctuation() {
        assert_eq!(START_MARKER, b'!');
        assert_eq!(END_MARKER, b'#');
    }
}
