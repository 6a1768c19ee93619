//! Watchdog and lifecycle state: the brainstem's last line of defense when
//! authenticated commands stop arriving. Safe-state entry is sticky — only
//! a newly admitted action clears it.

use crate::motor::MotorController;

/// Ticks of silence (at the 50 Hz control rate) before the watchdog forces
/// a safe state. 20000 ticks is the configured stall bound.
pub const MAX_CYCLES: u32 = 20_000;

#[derive(Debug)]
pub struct Watchdog {
    safe_state: bool,
    watchdog_timer: u32,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self {
            safe_state: true,
            watchdog_timer: 0,
        }
    }
}

impl Watchdog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_safe_state(&self) -> bool {
        self.safe_state
    }

    /// Call when the safety gate admits an action this tick: pets the
    /// watchdog and clears safe state.
    pub fn pet(&mut self) {
        self.safe_state = false;
        self.watchdog_timer = 0;
    }

    /// Call once per control tick, after the gate has had a chance to pet
    /// the watchdog. If the stall bound is reached, forces the motor
    /// controller's targets and integrals back to zero and enters safe
    /// state.
    pub fn tick(&mut self, motors: &mut MotorController) {
        if self.safe_state {
            return;
        }
        self.watchdog_timer += 1;
        if self.watchdog_timer >= MAX_CYCLES {
            self.safe_state = true;
            motors.zero_and_reset();
            tracing::error!("watchdog stall bound reached, forcing safe state");
        }
    }
}
