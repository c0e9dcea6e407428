//! Frame serialisation: the inverse of the streaming parser. Used by
//! tests, the demo loopback, and anything else that needs to hand-build
//! a syntactically valid frame of any message class.

use crate::checksum::{frame_checksum, header_checksum};
use thiserror::Error;

/// Protocol version currently produced by [`build_frame`]; read but never
/// checked on ingress by the parser (spec's documented lenient-version
/// tradeoff).
pub const PROTOCOL_VERSION: u16 = 1;

/// Minimum valid frame length (header + empty payload + trailer).
pub const MIN_FRAME_LEN: usize = 13;
/// Maximum valid frame length.
pub const MAX_FRAME_LEN: usize = 1400;

/// Start-of-frame marker byte.
pub const START_BYTE: u8 = 0x55;

/// Message class carrying the remote-controller status push.
pub const RC_PUSH_CLASS: u8 = 0x06;
/// Message id of the remote-controller status push within [`RC_PUSH_CLASS`].
pub const RC_PUSH_ID: u8 = 0x05;

/// 5-bit device-type codes packed into the routing bytes. Data, not
/// behaviour: the builder neither validates nor interprets these beyond
/// masking them into their 5-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Any = 0,
    Camera = 1,
    ApplicationHost = 2,
    FlightController = 3,
    Gimbal = 4,
    RemoteController = 6,
    Workstation = 10,
}

/// Frame direction: request or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackType {
    Request = 0,
    Response = 1,
}

/// Acknowledgement requirement for the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckKind {
    None = 0,
    AfterExec = 2,
}

/// Caller-supplied fields for [`build_frame`], excluding the payload
/// bytes themselves.
#[derive(Debug, Clone, Copy)]
pub struct FrameFields {
    pub sender_type: u8,
    pub sender_index: u8,
    pub receiver_type: u8,
    pub receiver_index: u8,
    pub sequence: u16,
    pub pack_type: PackType,
    pub ack: AckKind,
    pub encryption: u8,
    pub message_class: u8,
    pub message_id: u8,
}

/// Error returned by [`build_frame`].
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BuildError {
    /// `payload.len() + 13` exceeds [`MAX_FRAME_LEN`].
    #[error("payload of {0} bytes makes the frame exceed the {MAX_FRAME_LEN}-byte limit")]
    PayloadTooLarge(usize),
    /// The output buffer is not large enough to hold the serialised frame.
    #[error("output buffer has {have} bytes, frame needs {need}")]
    BufferTooSmall { need: usize, have: usize },
}

/// Serialises a complete frame (any message class) into `out`, returning
/// the number of bytes written.
///
/// Fails with [`BuildError::PayloadTooLarge`] when the implied total
/// length would exceed [`MAX_FRAME_LEN`], or [`BuildError::BufferTooSmall`]
/// when `out` cannot hold that many bytes.
pub fn build_frame(out: &mut [u8], fields: &FrameFields, payload: &[u8]) -> Result<usize, BuildError> {
    let total_len = 11 + payload.len() + 2;
    if total_len > MAX_FRAME_LEN {
        return Err(BuildError::PayloadTooLarge(payload.len()));
    }
    if out.len() < total_len {
        return Err(BuildError::BufferTooSmall { need: total_len, have: out.len() });
    }

    let length_version: u16 = (total_len as u16 & 0x03ff) | (PROTOCOL_VERSION << 10);
    out[0] = START_BYTE;
    out[1..3].copy_from_slice(&length_version.to_le_bytes());
    out[3] = header_checksum(&out[0..3]);

    out[4] = (fields.sender_type & 0x1f) | ((fields.sender_index & 0x07) << 5);
    out[5] = (fields.receiver_type & 0x1f) | ((fields.receiver_index & 0x07) << 5);
    out[6..8].copy_from_slice(&fields.sequence.to_le_bytes());

    let pack_type = fields.pack_type as u8;
    let ack = fields.ack as u8;
    out[8] = ((pack_type & 1) << 7) | ((ack & 0x03) << 5) | (fields.encryption & 0x07);
    out[9] = fields.message_class;
    out[10] = fields.message_id;

    out[11..11 + payload.len()].copy_from_slice(payload);

    let checksum = frame_checksum(&out[0..total_len - 2]);
    out[total_len - 2..total_len].copy_from_slice(&checksum.to_le_bytes());

    Ok(total_len)
}
