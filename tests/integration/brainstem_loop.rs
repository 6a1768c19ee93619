//! Exercises the full ingest → VM → gate → motor target → PID → watchdog
//! sequence the way `boreald`'s main loop drives it, using the real wire
//! codec instead of a decoded `IntentPacket` handed in directly. Covers
//! scenario 6 (watchdog engagement after a stall) end to end.

use boreal_core::chacha20::key_words;
use boreal_core::collab::MotorDriver;
use boreal_core::intent::intent_id;
use boreal_core::wire;
use boreal_core::IntentPacket;
use boreal_policy::compile;
use boreal_services::{watchdog::MAX_CYCLES, Brainstem};

struct StillMotor {
    velocity: [f32; 2],
    last_pwm: [i32; 2],
}

impl MotorDriver for StillMotor {
    fn set_pwm(&mut self, motor_id: usize, pwm: i32) {
        self.last_pwm[motor_id] = pwm;
    }
    fn read_velocity(&self, motor_id: usize) -> f32 {
        self.velocity[motor_id]
    }
}

fn test_keys() -> ([u32; 8], (u64, u64)) {
    let mut cipher_bytes = [0u8; 32];
    for (i, b) in cipher_bytes.iter_mut().enumerate() {
        *b = i as u8;
    }
    (key_words(&cipher_bytes), (0xAAAA_BBBB_CCCC_DDDD, 0x1111_2222_3333_4444))
}

const MOVE_POLICY: &str = "\
IF INTENT == 2 AND CONF >= 20000
ACT 2 50
DEFAULT DENY
";

#[test]
fn an_authenticated_move_frame_clears_safe_state_and_sets_motor_targets() {
    let (cipher_key, mac_key) = test_keys();
    let bc = compile(MOVE_POLICY).unwrap();
    let mut brainstem = Brainstem::new(bc);
    assert!(brainstem.is_safe_state(), "brainstem boots in safe state");

    let intent = IntentPacket::new(intent_id::MOVE, 27851, &[30]);
    let frame = wire::encode(&cipher_key, mac_key, 1, 1, 0, &intent);

    let decoded = wire::decode(&cipher_key, mac_key, 0, &frame).expect("valid frame");
    brainstem.admit_intent(&decoded.intent);
    assert!(!brainstem.is_safe_state());

    let mut driver = StillMotor { velocity: [0.0, 0.0], last_pwm: [0, 0] };
    brainstem.control_tick(&mut driver);
    assert!(driver.last_pwm[0] > 0, "PID should push toward the new nonzero target");
}

#[test]
fn a_tampered_frame_is_dropped_and_never_reaches_the_vm() {
    let (cipher_key, mac_key) = test_keys();
    let bc = compile(MOVE_POLICY).unwrap();
    let mut brainstem = Brainstem::new(bc);

    let intent = IntentPacket::new(intent_id::MOVE, 27851, &[30]);
    let mut frame = wire::encode(&cipher_key, mac_key, 1, 1, 0, &intent);
    frame[20] ^= 0x01; // corrupt a byte inside the authenticated payload

    assert!(wire::decode(&cipher_key, mac_key, 0, &frame).is_err());
    assert!(brainstem.is_safe_state(), "no admitted intent, so safe state never clears");
}

#[test]
fn stalling_the_frame_source_after_one_admission_forces_safe_state_at_max_cycles() {
    let (cipher_key, mac_key) = test_keys();
    let bc = compile(MOVE_POLICY).unwrap();
    let mut brainstem = Brainstem::new(bc);

    let intent = IntentPacket::new(intent_id::MOVE, 27851, &[10]);
    let frame = wire::encode(&cipher_key, mac_key, 1, 1, 0, &intent);
    let decoded = wire::decode(&cipher_key, mac_key, 0, &frame).unwrap();
    brainstem.admit_intent(&decoded.intent);
    assert!(!brainstem.is_safe_state());

    let mut driver = StillMotor { velocity: [0.0, 0.0], last_pwm: [0, 0] };
    // No further frames arrive: the source has stalled. Run exactly
    // MAX_CYCLES control ticks with no intervening admit_intent calls.
    for _ in 0..MAX_CYCLES {
        brainstem.control_tick(&mut driver);
    }

    assert!(brainstem.is_safe_state());
    assert_eq!(brainstem.motor_target(0), 0.0);
    assert_eq!(brainstem.motor_target(1), 0.0);
}
