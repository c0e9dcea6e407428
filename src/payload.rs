//! Decoder for the 17-byte remote-controller button/stick status payload.
//!
//! The bit layout here was recovered by reverse engineering, not
//! documented by a vendor, so every extraction masks the exact bits it
//! needs rather than comparing whole bytes — reserved bits (byte 3 in
//! full, plus scattered reserved bits in bytes 0, 1, 2 and 4) must never
//! leak into a decoded field.

use thiserror::Error;

/// Minimum payload length the decoder accepts.
pub const PUSH_PAYLOAD_LEN: usize = 17;

/// Centring offset subtracted from raw analog readings before signed
/// reinterpretation.
const CENTRE_OFFSET: u16 = 0x0400;

/// Error returned by [`decode_push_payload`].
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum PayloadError {
    /// The payload buffer was shorter than [`PUSH_PAYLOAD_LEN`] bytes.
    #[error("push payload too short: need {PUSH_PAYLOAD_LEN} bytes, got {0}")]
    ShortPayload(usize),
}

/// Three-position latching flight-mode switch, plus a sentinel for the
/// otherwise-unreachable fourth encoding of a 2-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightMode {
    Sport = 0,
    Normal = 1,
    Tripod = 2,
    /// Reserved encoding (`0b11`); not a real switch position.
    Unknown = 3,
}

impl From<u8> for FlightMode {
    fn from(bits: u8) -> Self {
        match bits & 0x03 {
            0 => FlightMode::Sport,
            1 => FlightMode::Normal,
            2 => FlightMode::Tripod,
            _ => FlightMode::Unknown,
        }
    }
}

/// Five independent directional booleans; any subset may be asserted at
/// once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FiveWayPad {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub centre: bool,
}

/// A single analog stick or wheel's zero-centred reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StickAxes {
    pub horizontal: i16,
    pub vertical: i16,
}

/// Decoded snapshot of controller inputs. A plain value: callers may
/// freely copy it, and a fresh one is produced per accepted push frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    pub pause: bool,
    pub gohome: bool,
    pub shutter: bool,
    pub record: bool,
    pub custom1: bool,
    pub custom2: bool,
    pub custom3: bool,
    pub pad: FiveWayPad,
    pub flight_mode: FlightMode,
    pub right_stick: StickAxes,
    pub left_stick: StickAxes,
    pub left_wheel: i16,
    pub right_wheel: i16,
    /// Rotary-encoder tick delta for the right wheel, range -31..=31.
    pub right_wheel_increment: i8,
}

/// Reinterprets a raw little-endian 16-bit analog reading as a
/// zero-centred signed value, wrapping modulo 2^16 rather than
/// saturating. `U = 0` yields `-1024`; `U = 0xFFFF` yields `-1025`;
/// `U = 0x0400` yields `0`. This wraparound is load-bearing, not a bug.
fn centre(raw: u16) -> i16 {
    raw.wrapping_sub(CENTRE_OFFSET) as i16
}

fn read_centred(payload: &[u8], offset: usize) -> i16 {
    let raw = u16::from_le_bytes([payload[offset], payload[offset + 1]]);
    centre(raw)
}

/// Decodes a 17-byte push payload into a [`ControllerState`].
///
/// Fails with [`PayloadError::ShortPayload`] when `payload` is shorter
/// than [`PUSH_PAYLOAD_LEN`] bytes. Bytes beyond the 17th, if any, are
/// ignored by this function (the caller's frame-length bookkeeping is
/// responsible for trimming the payload region).
pub fn decode_push_payload(payload: &[u8]) -> Result<ControllerState, PayloadError> {
    if payload.len() < PUSH_PAYLOAD_LEN {
        return Err(PayloadError::ShortPayload(payload.len()));
    }

    let byte0 = payload[0];
    let byte1 = payload[1];
    let byte2 = payload[2];
    let byte4 = payload[4];

    let magnitude = (byte4 >> 1) & 0x1f;
    let sign_positive = byte4 & 0x40 != 0;
    let right_wheel_increment = if magnitude == 0 {
        0
    } else if sign_positive {
        magnitude as i8
    } else {
        -(magnitude as i8)
    };

    Ok(ControllerState {
        pause: byte0 & 0x10 != 0,
        gohome: byte0 & 0x20 != 0,
        shutter: byte0 & 0x40 != 0,
        record: byte1 & 0x01 != 0,
        custom1: byte2 & 0x04 != 0,
        custom2: byte2 & 0x08 != 0,
        custom3: byte2 & 0x10 != 0,
        pad: FiveWayPad {
            right: byte1 & 0x08 != 0,
            up: byte1 & 0x10 != 0,
            down: byte1 & 0x20 != 0,
            left: byte1 & 0x40 != 0,
            centre: byte1 & 0x80 != 0,
        },
        flight_mode: FlightMode::from(byte2),
        right_stick: StickAxes {
            horizontal: read_centred(payload, 5),
            vertical: read_centred(payload, 7),
        },
        left_stick: StickAxes {
            vertical: read_centred(payload, 9),
            horizontal: read_centred(payload, 11),
        },
        left_wheel: read_centred(payload, 13),
        right_wheel: read_centred(payload, 15),
        right_wheel_increment,
    })
}
