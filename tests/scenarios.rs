#[cfg(test)]
mod tests {
    use rc_frame::frame::{build_frame, AckKind, DeviceType, FrameFields, PackType, RC_PUSH_CLASS, RC_PUSH_ID};
    use rc_frame::parser::Parser;
    use rc_frame::payload::{decode_push_payload, FlightMode, PUSH_PAYLOAD_LEN};

    fn centred_payload() -> [u8; PUSH_PAYLOAD_LEN] {
        let mut p = [0u8; PUSH_PAYLOAD_LEN];
        let mut i = 5;
        while i < 17 {
            p[i] = 0x00;
            p[i + 1] = 0x04;
            i += 2;
        }
        p
    }

    fn all_pressed_payload() -> [u8; PUSH_PAYLOAD_LEN] {
        let mut p = centred_payload();
        p[0] = 0x70;
        p[1] = 0xf9;
        p[2] = 0x1d;
        p
    }

    fn sample_fields() -> FrameFields {
        FrameFields {
            sender_type: DeviceType::RemoteController as u8,
            sender_index: 0,
            receiver_type: DeviceType::ApplicationHost as u8,
            receiver_index: 0,
            sequence: 0x0001,
            pack_type: PackType::Request,
            ack: AckKind::None,
            encryption: 0,
            message_class: RC_PUSH_CLASS,
            message_id: RC_PUSH_ID,
        }
    }

    fn build(payload: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; 64];
        let n = build_frame(&mut out, &sample_fields(), payload).unwrap();
        out.truncate(n);
        out
    }

    /// Scenario 1: all-zero payload.
    #[test]
    fn scenario_all_zero_payload() {
        let p = [0u8; PUSH_PAYLOAD_LEN];
        let s = decode_push_payload(&p).unwrap();
        assert!(!s.pause && !s.gohome && !s.shutter && !s.record);
        assert_eq!(s.flight_mode, FlightMode::Sport);
        assert_eq!(s.right_stick.horizontal, -1024);
        assert_eq!(s.right_stick.vertical, -1024);
        assert_eq!(s.left_stick.horizontal, -1024);
        assert_eq!(s.left_stick.vertical, -1024);
        assert_eq!(s.left_wheel, -1024);
        assert_eq!(s.right_wheel, -1024);
        assert_eq!(s.right_wheel_increment, 0);
    }

    /// Scenario 2: centred payload.
    #[test]
    fn scenario_centred_payload() {
        let p = centred_payload();
        let s = decode_push_payload(&p).unwrap();
        assert_eq!(s.right_stick.horizontal, 0);
        assert_eq!(s.right_stick.vertical, 0);
        assert_eq!(s.left_stick.horizontal, 0);
        assert_eq!(s.left_stick.vertical, 0);
        assert_eq!(s.left_wheel, 0);
        assert_eq!(s.right_wheel, 0);
        assert_eq!(s.right_wheel_increment, 0);
        assert!(!s.pause && !s.gohome && !s.shutter && !s.record);
        assert_eq!(s.flight_mode, FlightMode::Sport);
    }

    /// Scenario 3: all buttons and pad directions pressed, flight mode Normal.
    #[test]
    fn scenario_all_pressed_payload() {
        let p = all_pressed_payload();
        let s = decode_push_payload(&p).unwrap();
        assert!(s.pause && s.gohome && s.shutter && s.record);
        assert!(s.custom1 && s.custom2 && s.custom3);
        assert!(s.pad.up && s.pad.down && s.pad.left && s.pad.right && s.pad.centre);
        assert_eq!(s.flight_mode, FlightMode::Normal);
    }

    /// Scenario 4: full frame roundtrip through the parser.
    #[test]
    fn scenario_full_frame_roundtrip() {
        let frame = build(&centred_payload());
        assert_eq!(frame.len(), 30);

        let received = std::cell::RefCell::new(Vec::new());
        let mut parser = Parser::new(|s| received.borrow_mut().push(*s));
        let count = parser.feed(&frame);
        assert_eq!(count, 1);
        let expected = decode_push_payload(&centred_payload()).unwrap();
        assert_eq!(received.borrow()[0], expected);
    }

    /// Scenario 5: noise, frame, noise, frame — exactly two callbacks in order.
    #[test]
    fn scenario_noise_frame_noise_frame() {
        let frame1 = build(&centred_payload());
        let frame2 = build(&all_pressed_payload());

        let mut stream = vec![1u8, 2, 3, 4, 5];
        stream.extend_from_slice(&frame1);
        stream.extend(std::iter::repeat(9u8).take(10));
        stream.extend_from_slice(&frame2);

        let received = std::cell::RefCell::new(Vec::new());
        let mut parser = Parser::new(|s| received.borrow_mut().push(*s));
        let count = parser.feed(&stream);
        assert_eq!(count, 2);

        let expected1 = decode_push_payload(&centred_payload()).unwrap();
        let expected2 = decode_push_payload(&all_pressed_payload()).unwrap();
        assert_eq!(received.borrow()[0], expected1);
        assert_eq!(received.borrow()[1], expected2);
    }

    /// Scenario 6: valid checksums but a push payload shorter than 17 bytes.
    #[test]
    fn scenario_short_push_payload() {
        let short_payload = [0u8; 10];
        let frame = build(&short_payload);

        let mut parser = Parser::new(|_s| panic!("callback must not fire for a short push payload"));
        assert_eq!(parser.feed(&frame), 0);
    }
}
