//! # rc-frame
//!
//! Streaming decoder for a proprietary, length-prefixed, checksum-gated
//! binary frame protocol, plus a bit-level decoder for one payload type
//! carried over it: a remote-controller button/stick status push.
//!
//! Four pieces cooperate, leaves first: two table-driven checksum
//! kernels ([`checksum`]), a pure payload decoder ([`payload`]), a pure
//! frame builder ([`frame`]), and a stateful streaming parser
//! ([`parser`]) that resynchronises onto frame boundaries inside an
//! arbitrary, possibly-noisy, possibly-chunked byte stream and emits a
//! decoded snapshot per accepted frame.
//!
//! ## Example
//! ```
//! use rc_frame::frame::{build_frame, AckKind, DeviceType, FrameFields, PackType, RC_PUSH_CLASS, RC_PUSH_ID};
//! use rc_frame::parser::Parser;
//!
//! let fields = FrameFields {
//!     sender_type: DeviceType::RemoteController as u8,
//!     sender_index: 0,
//!     receiver_type: DeviceType::ApplicationHost as u8,
//!     receiver_index: 0,
//!     sequence: 1,
//!     pack_type: PackType::Request,
//!     ack: AckKind::None,
//!     encryption: 0,
//!     message_class: RC_PUSH_CLASS,
//!     message_id: RC_PUSH_ID,
//! };
//! let payload = [0u8; 17];
//! let mut out = [0u8; 64];
//! let n = build_frame(&mut out, &fields, &payload).unwrap();
//!
//! let mut seen = 0;
//! let mut parser = Parser::new(|_state| seen += 1);
//! parser.feed(&out[..n]);
//! assert_eq!(seen, 1);
//! ```

pub mod checksum;
pub mod frame;
pub mod parser;
pub mod payload;

pub use frame::{build_frame, BuildError, FrameFields};
pub use parser::Parser;
pub use payload::{decode_push_payload, ControllerState, FlightMode, PayloadError};
