//! Scenario 3/4 from the testable-properties list: a host-encoded frame is
//! accepted exactly once by a firmware-side decode, and a resubmission of
//! the identical frame is rejected as a replay without disturbing
//! `last_seq`.

use boreal_core::chacha20::key_words;
use boreal_core::intent::intent_id;
use boreal_core::wire::{self, WireError};
use boreal_core::IntentPacket;

fn test_keys() -> ([u32; 8], (u64, u64)) {
    let mut cipher_bytes = [0u8; 32];
    for (i, b) in cipher_bytes.iter_mut().enumerate() {
        *b = i as u8;
    }
    (
        key_words(&cipher_bytes),
        (0x0123_4567_89AB_CDEF, 0xFEDC_BA98_7654_3210),
    )
}

#[test]
fn host_encoded_frame_is_accepted_and_decoded_exactly() {
    let (cipher_key, mac_key) = test_keys();
    let mut aux = vec![30];
    aux.resize(18, 0);
    let intent = IntentPacket::new(intent_id::MOVE, 27851, &aux);

    let frame = wire::encode(&cipher_key, mac_key, 7, 1, 1_000, &intent);
    assert_eq!(frame.len(), wire::FRAME_LEN);

    let decoded = wire::decode(&cipher_key, mac_key, 0, &frame).expect("first decode must succeed");
    assert_eq!(decoded.header.seq, 1);
    assert_eq!(decoded.intent.intent_id, intent_id::MOVE);
    assert_eq!(decoded.intent.conf_q15, 27851);
    assert_eq!(decoded.intent.aux[0], 30);
    assert!(decoded.intent.aux[1..].iter().all(|&v| v == 0));
}

#[test]
fn resubmitting_an_accepted_frame_is_rejected_as_replay() {
    let (cipher_key, mac_key) = test_keys();
    let intent = IntentPacket::new(intent_id::MOVE, 27851, &[30]);
    let frame = wire::encode(&cipher_key, mac_key, 7, 1, 1_000, &intent);

    let decoded = wire::decode(&cipher_key, mac_key, 0, &frame).expect("accepted once");
    let last_seq = decoded.header.seq;
    assert_eq!(last_seq, 1);

    let err = wire::decode(&cipher_key, mac_key, last_seq, &frame).unwrap_err();
    assert_eq!(
        err,
        WireError::Replay {
            seq: 1,
            last_seq: 1
        }
    );
}

#[test]
fn sequence_must_strictly_increase_across_a_run() {
    let (cipher_key, mac_key) = test_keys();
    let mut last_seq = 0u32;

    for seq in 1..=5u32 {
        let intent = IntentPacket::new(intent_id::STOP, 32767, &[]);
        let frame = wire::encode(&cipher_key, mac_key, 1, seq, seq * 20, &intent);
        let decoded = wire::decode(&cipher_key, mac_key, last_seq, &frame).expect("in-order frame");
        assert_eq!(decoded.header.seq, seq);
        last_seq = decoded.header.seq;
    }

    // A stale seq from earlier in the run is still a replay against the
    // latest last_seq, not just against its own original position.
    let stale = wire::encode(&cipher_key, mac_key, 1, 3, 60, &IntentPacket::new(intent_id::STOP, 0, &[]));
    let err = wire::decode(&cipher_key, mac_key, last_seq, &stale).unwrap_err();
    assert_eq!(
        err,
        WireError::Replay {
            seq: 3,
            last_seq: 5
        }
    );
}

#[test]
fn wrong_mac_key_fails_closed_without_leaking_plaintext() {
    let (cipher_key, mac_key) = test_keys();
    let wrong_mac_key = (mac_key.0 ^ 1, mac_key.1);
    let intent = IntentPacket::new(intent_id::TURN, 32000, &[-30]);
    let frame = wire::encode(&cipher_key, mac_key, 1, 1, 0, &intent);

    let err = wire::decode(&cipher_key, wrong_mac_key, 0, &frame).unwrap_err();
    assert_eq!(err, WireError::MacFail);
}
