//! `boreal-sim` — single-process demonstration of the full pipeline: a
//! host-side encoder and a firmware-side [`Brainstem`] wired together over
//! an in-memory byte channel instead of a real serial link, with a
//! simulated motor plant standing in for `motor_driver::set_pwm`/
//! `read_velocity`.
//!
//! Not part of the core (§1's Non-goals exclude "the demo harness that
//! wires host and simulated firmware in one process"): this binary exists
//! to exercise the pipeline end to end for manual inspection and as a
//! living example of how `boreal-hostd` and `boreald` are meant to be
//! composed, not as a substitute for either.

use libboreal::chacha20::key_words;
use libboreal::collab::MotorDriver;
use libboreal::intent::intent_id;
use libboreal::wire;
use libboreal::{Brainstem, IntentPacket};

/// A first-order-lag motor plant, the simulated stand-in for real
/// actuator hardware (the core's contract ends at "this PWM was
/// committed"; everything past that is the collaborator's plant model).
struct SimulatedPlant {
    velocity: [f32; 2],
    last_pwm: [i32; 2],
}

impl SimulatedPlant {
    fn new() -> Self {
        Self {
            velocity: [0.0; 2],
            last_pwm: [0; 2],
        }
    }

    fn settle(&mut self) {
        const LAG: f32 = 0.2;
        for id in 0..2 {
            let target_velocity = self.last_pwm[id] as f32 / 1000.0;
            self.velocity[id] += (target_velocity - self.velocity[id]) * LAG;
        }
    }
}

impl MotorDriver for SimulatedPlant {
    fn set_pwm(&mut self, motor_id: usize, pwm: i32) {
        self.last_pwm[motor_id] = pwm;
    }
    fn read_velocity(&self, motor_id: usize) -> f32 {
        self.velocity[motor_id]
    }
}

/// Cycles through the same three canned intents the reference demo used
/// to simulate an AI inference source, one per call.
struct CannedIntentSource {
    step: usize,
}

impl CannedIntentSource {
    const INTENTS: [(u16, u16, &'static str); 3] = [
        (intent_id::STOP, 0, "STOP"),
        (intent_id::MOVE, 30_000, "APPROACH"),
        (intent_id::TURN, 20_000, "TURN_LEFT"),
    ];

    fn next(&mut self) -> (u16, u16, &'static str) {
        let entry = Self::INTENTS[self.step % Self::INTENTS.len()];
        self.step += 1;
        entry
    }
}

fn demo_policy() -> Vec<u8> {
    libboreal::compile(
        "IF INTENT == 1 AND CONF >= 0\n\
         ACT 1 0\n\
         IF INTENT == 2 AND CONF >= 25000\n\
         ACT 2 50\n\
         IF INTENT == 3 AND CONF >= 15000\n\
         ACT 3 -20\n\
         DEFAULT DENY\n",
    )
    .expect("demo policy compiles")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cipher_key = key_words(&[0u8; 32]);
    let mac_key = (0xA3B1_C2D3_E4F5_6789u64, 0x1020_3040_5060_7080u64);

    let mut brainstem = Brainstem::new(demo_policy());
    let mut plant = SimulatedPlant::new();
    let mut source = CannedIntentSource { step: 0 };

    let mut seq = 0u32;
    for round in 0..9u32 {
        let (intent_id, conf_q15, name) = source.next();
        seq += 1;

        let packet = IntentPacket::new(intent_id, conf_q15, &[30]);
        let frame = wire::encode(&cipher_key, mac_key, 1, seq, round * 20, &packet);

        match wire::decode(&cipher_key, mac_key, seq - 1, &frame) {
            Ok(decoded) => brainstem.admit_intent(&decoded.intent),
            Err(err) => tracing::warn!(%err, "demo frame rejected"),
        }

        brainstem.control_tick(&mut plant);
        plant.settle();

        println!(
            "round {round}: intent={name} safe_state={} target=({:.2}, {:.2})",
            brainstem.is_safe_state(),
            brainstem.motor_target(0),
            brainstem.motor_target(1),
        );
    }

    println!("\nstalling the frame source to demonstrate watchdog engagement...");
    for _ in 0..libboreal::watchdog::MAX_CYCLES {
        brainstem.control_tick(&mut plant);
    }
    println!(
        "after the stall bound: safe_state={} target=({:.2}, {:.2})",
        brainstem.is_safe_state(),
        brainstem.motor_target(0),
        brainstem.motor_target(1),
    );
}
