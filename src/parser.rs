//! The streaming frame parser: buffers arbitrary byte chunks in a
//! bounded ring, resynchronises onto frame boundaries using the two
//! checksum kernels, and emits a decoded [`ControllerState`] for every
//! accepted push frame.
//!
//! A two-macro-state scanner (SEEKING_START / ACCUMULATING_FRAME)
//! backed by an explicit bounded ring buffer, since this wire format
//! carries its length up front instead of relying on byte-stuffing to
//! find the end of a frame.

use log::{debug, warn};

use crate::checksum::{frame_checksum, header_checksum};
use crate::frame::{MAX_FRAME_LEN, MIN_FRAME_LEN, RC_PUSH_CLASS, RC_PUSH_ID, START_BYTE};
use crate::payload::{decode_push_payload, ControllerState, PUSH_PAYLOAD_LEN};

/// Ring buffer capacity in bytes. Writes beyond capacity silently
/// overwrite the oldest buffered byte; this is the defined overflow
/// behaviour, recoverable because the next successful scan resyncs on
/// the next valid header.
const RING_CAPACITY: usize = 4096;

struct RingBuffer {
    data: Box<[u8; RING_CAPACITY]>,
    head: usize,
    count: usize,
}

impl RingBuffer {
    fn new() -> Self {
        RingBuffer {
            data: Box::new([0u8; RING_CAPACITY]),
            head: 0,
            count: 0,
        }
    }

    fn len(&self) -> usize {
        self.count
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Writes one byte, returning `true` if it overwrote a previously
    /// buffered byte (i.e. the ring was already full).
    fn push(&mut self, byte: u8) -> bool {
        let idx = (self.head + self.count) % RING_CAPACITY;
        self.data[idx] = byte;
        if self.count < RING_CAPACITY {
            self.count += 1;
            false
        } else {
            self.head = (self.head + 1) % RING_CAPACITY;
            true
        }
    }

    /// Reads the byte at logical position `pos` (0 = oldest buffered byte).
    fn get(&self, pos: usize) -> u8 {
        self.data[(self.head + pos) % RING_CAPACITY]
    }

    /// Copies out the first `len` logical bytes without discarding them.
    fn copy_out(&self, len: usize) -> Vec<u8> {
        (0..len).map(|i| self.get(i)).collect()
    }

    /// Discards the first `len` logical bytes (oldest first).
    fn discard(&mut self, len: usize) {
        self.head = (self.head + len) % RING_CAPACITY;
        self.count -= len;
    }
}

#[derive(Clone, Copy)]
enum ScanState {
    SeekingStart,
    AccumulatingFrame { expected_len: usize },
}

/// Stateful streaming parser. Owns a 4096-byte ring buffer, a two-state
/// scanner, and a consumer callback invoked once per accepted push
/// frame. A single parser is not meant to be fed concurrently by more
/// than one producer (spec's exclusive-ownership model); nothing here
/// is `Sync`.
pub struct Parser<F>
where
    F: FnMut(&ControllerState),
{
    callback: F,
    ring: RingBuffer,
    state: ScanState,
}

impl<F> Parser<F>
where
    F: FnMut(&ControllerState),
{
    /// Creates a parser around `callback`, which is invoked synchronously
    /// from [`Parser::feed`] once per accepted push frame, in
    /// frame-completion order. The callback owns whatever opaque context
    /// it needs via closure capture.
    pub fn new(callback: F) -> Self {
        Parser {
            callback,
            ring: RingBuffer::new(),
            state: ScanState::SeekingStart,
        }
    }

    /// Discards any buffered bytes and returns to the initial
    /// SEEKING_START state. Use after a transport reconnect.
    pub fn reset(&mut self) {
        self.ring = RingBuffer::new();
        self.state = ScanState::SeekingStart;
    }

    /// Feeds a chunk of bytes into the parser, returning the number of
    /// push frames successfully delivered to the callback during this
    /// call. Chunking is arbitrary: feeding the same byte sequence split
    /// into any partition (including one byte at a time) yields the same
    /// total deliveries and the same decoded snapshots.
    ///
    /// Each byte is pushed into the ring and scanned before the next
    /// byte is pushed, so a complete frame already sitting in the ring
    /// is always recognised and consumed ahead of any trailing bytes in
    /// this same call that would otherwise overflow it.
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        let mut overflowed = false;
        let mut delivered = 0;
        for &b in bytes {
            if self.ring.push(b) {
                overflowed = true;
            }
            delivered += self.scan();
        }
        if overflowed {
            warn!("ring buffer overflow, oldest unread bytes were discarded");
        }
        delivered
    }

    /// Runs the resync/accumulate state machine to quiescence against
    /// whatever is currently buffered, returning the number of push
    /// frames delivered. Blocks (returns control to the caller) only
    /// when the ring holds too little data to make further progress.
    fn scan(&mut self) -> usize {
        let mut delivered = 0;
        loop {
            match self.state {
                ScanState::SeekingStart => {
                    if self.ring.is_empty() {
                        break;
                    }
                    if self.ring.get(0) != START_BYTE {
                        self.ring.discard(1);
                        continue;
                    }
                    if self.ring.len() < 4 {
                        break;
                    }
                    let header = [self.ring.get(0), self.ring.get(1), self.ring.get(2)];
                    if header_checksum(&header) != self.ring.get(3) {
                        warn!("header checksum mismatch, dropping one byte and rescanning");
                        self.ring.discard(1);
                        continue;
                    }
                    let word = u16::from_le_bytes([header[1], header[2]]);
                    let length = (word & 0x03ff) as usize;
                    if length < MIN_FRAME_LEN || length > MAX_FRAME_LEN {
                        warn!("candidate length {length} out of range, dropping one byte");
                        self.ring.discard(1);
                        continue;
                    }
                    self.state = ScanState::AccumulatingFrame { expected_len: length };
                }
                ScanState::AccumulatingFrame { expected_len } => {
                    if self.ring.len() < expected_len {
                        break;
                    }
                    let frame = self.ring.copy_out(expected_len);
                    self.ring.discard(expected_len);
                    self.state = ScanState::SeekingStart;

                    let trailer = u16::from_le_bytes([frame[expected_len - 2], frame[expected_len - 1]]);
                    let computed = frame_checksum(&frame[0..expected_len - 2]);
                    if computed != trailer {
                        warn!("full-frame checksum mismatch, dropping {expected_len}-byte candidate");
                        continue;
                    }

                    let class = frame[9];
                    let id = frame[10];
                    if class != RC_PUSH_CLASS || id != RC_PUSH_ID {
                        warn!("ignoring frame of class {class:#x} id {id:#x}");
                        continue;
                    }

                    let payload = &frame[11..expected_len - 2];
                    if payload.len() < PUSH_PAYLOAD_LEN {
                        warn!("push frame payload too short ({} bytes), dropping", payload.len());
                        continue;
                    }

                    match decode_push_payload(payload) {
                        Ok(snapshot) => {
                            debug!("delivering decoded push frame, seq unknown to this layer");
                            (self.callback)(&snapshot);
                            delivered += 1;
                        }
                        Err(err) => {
                            warn!("push payload decode failed unexpectedly: {err}");
                        }
                    }
                }
            }
        }
        delivered
    }
}
