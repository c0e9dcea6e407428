//! Feeds a synthetic noisy stream — non-frame bytes interleaved with two
//! valid push frames — into the parser and prints what gets delivered.
//! Stands in for reading off an imperfect transport (USB bulk endpoint,
//! domain socket, input-event device) where noise and partial reads are
//! routine.

use rc_frame::frame::{build_frame, AckKind, DeviceType, FrameFields, PackType, RC_PUSH_CLASS, RC_PUSH_ID};
use rc_frame::parser::Parser;

fn build_push_frame(payload: &[u8; 17], sequence: u16) -> Vec<u8> {
    let fields = FrameFields {
        sender_type: DeviceType::RemoteController as u8,
        sender_index: 0,
        receiver_type: DeviceType::ApplicationHost as u8,
        receiver_index: 0,
        sequence,
        pack_type: PackType::Request,
        ack: AckKind::None,
        encryption: 0,
        message_class: RC_PUSH_CLASS,
        message_id: RC_PUSH_ID,
    };
    let mut out = vec![0u8; 64];
    let n = build_frame(&mut out, &fields, payload).expect("payload fits");
    out.truncate(n);
    out
}

/// A small deterministic PRNG so this demo needs no extra dependency for
/// filler noise.
fn next_noise_byte(state: &mut u32) -> u8 {
    *state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
    // Avoid ever emitting the start-of-frame byte so the noise truly
    // never contains an accidental frame boundary.
    let b = (*state >> 16) as u8;
    if b == 0x55 {
        b.wrapping_add(1)
    } else {
        b
    }
}

fn main() {
    env_logger::init();

    let centred = {
        let mut p = [0u8; 17];
        let mut i = 5;
        while i < 17 {
            p[i] = 0x00;
            p[i + 1] = 0x04;
            i += 2;
        }
        p
    };
    let mut pressed = centred;
    pressed[0] = 0x70;
    pressed[1] = 0xf9;
    pressed[2] = 0x1d;

    let frame_a = build_push_frame(&centred, 1);
    let frame_b = build_push_frame(&pressed, 2);

    let mut rng = 0xdead_beefu32;
    let mut stream = Vec::new();
    for _ in 0..5 {
        stream.push(next_noise_byte(&mut rng));
    }
    stream.extend_from_slice(&frame_a);
    for _ in 0..37 {
        stream.push(next_noise_byte(&mut rng));
    }
    stream.extend_from_slice(&frame_b);
    for _ in 0..9 {
        stream.push(next_noise_byte(&mut rng));
    }

    let mut delivered = Vec::new();
    let mut parser = Parser::new(|state| delivered.push(*state));

    // Feed in uneven chunks to demonstrate chunking invariance, not just
    // whole-stream delivery.
    for chunk in stream.chunks(13) {
        parser.feed(chunk);
    }

    println!("delivered {} push frame(s) out of {} noisy bytes", delivered.len(), stream.len());
    for (i, state) in delivered.iter().enumerate() {
        println!("frame {i}: {state:?}");
    }
}
