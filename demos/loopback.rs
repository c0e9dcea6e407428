//! Builds a push frame with the frame builder, feeds it back through a
//! fresh parser both whole and one byte at a time, and prints the
//! decoded controller state. Stands in for a terminal-based emulator's
//! build-then-parse loopback path.

use rc_frame::frame::{build_frame, AckKind, DeviceType, FrameFields, PackType, RC_PUSH_CLASS, RC_PUSH_ID};
use rc_frame::parser::Parser;

fn sample_payload() -> [u8; 17] {
    // All-pressed buttons/pad, sticks and wheels centred.
    let mut p = [0u8; 17];
    p[0] = 0x70;
    p[1] = 0xf9;
    p[2] = 0x1d;
    let mut i = 5;
    while i < 17 {
        p[i] = 0x00;
        p[i + 1] = 0x04;
        i += 2;
    }
    p
}

fn main() {
    env_logger::init();

    let fields = FrameFields {
        sender_type: DeviceType::RemoteController as u8,
        sender_index: 0,
        receiver_type: DeviceType::ApplicationHost as u8,
        receiver_index: 0,
        sequence: 0x0042,
        pack_type: PackType::Request,
        ack: AckKind::None,
        encryption: 0,
        message_class: RC_PUSH_CLASS,
        message_id: RC_PUSH_ID,
    };
    let payload = sample_payload();

    let mut frame = vec![0u8; 64];
    let n = build_frame(&mut frame, &fields, &payload).expect("payload is well within size limits");
    frame.truncate(n);

    print!("built frame: [ ");
    for b in &frame {
        print!("{b:02x} ");
    }
    println!("]");

    let mut parser = Parser::new(|state| {
        println!("whole-frame delivery: {state:?}");
    });
    let delivered = parser.feed(&frame);
    println!("delivered {delivered} frame(s) in one call");

    let mut parser = Parser::new(|state| {
        println!("byte-at-a-time delivery: {state:?}");
    });
    let mut delivered = 0;
    for &b in &frame {
        delivered += parser.feed(&[b]);
    }
    println!("delivered {delivered} frame(s) one byte at a time");
}
