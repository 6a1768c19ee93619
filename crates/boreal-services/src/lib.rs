//! boreal-services — the brainstem's transport-independent business logic:
//! the decision VM, the safety gate, the motor PID controller, and the
//! watchdog/lifecycle state machine. Nothing here touches a serial port;
//! that's `boreald`'s job.

pub mod gate;
pub mod motor;
pub mod vm;
pub mod watchdog;

use boreal_core::IntentPacket;
use gate::SafetyGate;
use motor::MotorController;
use watchdog::Watchdog;

/// The brainstem's owned control-loop state: everything carried from one
/// tick to the next, collected into a single record per the wire/VM
/// contract's statelessness (§5's "collect each side's state into a single
/// owned record").
pub struct Brainstem {
    bytecode: Vec<u8>,
    prev_act_id: u8,
    gate: SafetyGate,
    motors: MotorController,
    watchdog: Watchdog,
    tick: u32,
}

impl Brainstem {
    pub fn new(bytecode: Vec<u8>) -> Self {
        Self {
            bytecode,
            prev_act_id: 0,
            gate: SafetyGate::new(),
            motors: MotorController::new(),
            watchdog: Watchdog::new(),
            tick: 0,
        }
    }

    pub fn is_safe_state(&self) -> bool {
        self.watchdog.is_safe_state()
    }

    /// Current commanded target velocity for `motor_id` (0 or 1).
    pub fn motor_target(&self, motor_id: usize) -> f32 {
        self.motors.target(motor_id)
    }

    /// Run one ingest→VM→gate→motor-target step against a freshly decoded,
    /// authenticated intent packet. This does not run the PID step or the
    /// watchdog tick — those happen once per control tick regardless of
    /// whether a frame arrived (§5's ordering guarantee).
    pub fn admit_intent(&mut self, packet: &IntentPacket) {
        let (action, next_prev) = vm::run(&self.bytecode, packet, self.prev_act_id);
        self.prev_act_id = next_prev;
        if let Some(admitted) = self.gate.admit(action, self.tick) {
            tracing::info!(act_id = admitted.act_id, param = admitted.param, "action admitted");
            self.motors.apply_action(admitted);
            self.watchdog.pet();
        }
    }

    /// Run the control tick: PID step against the driver, then the
    /// watchdog tick, then advance the tick counter. Called at 50 Hz
    /// regardless of frame arrival.
    pub fn control_tick<D: boreal_core::collab::MotorDriver>(&mut self, driver: &mut D) {
        self.motors.step(driver);
        self.watchdog.tick(&mut self.motors);
        self.tick = self.tick.wrapping_add(1);
    }
}
