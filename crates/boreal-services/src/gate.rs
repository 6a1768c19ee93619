//! Safety gate: invariants the VM's bytecode has no vocabulary to express,
//! applied uniformly to whatever action the VM committed. The VM trusts the
//! policy author; the gate trusts no one.

use boreal_core::intent::act_id;
use boreal_core::Action;

/// Control loop runs at 50 Hz; `MOVE` is rate-limited to no faster than one
/// admission per tick at that rate.
pub const CONTROL_HZ: u32 = 50;
pub const MOVE_MIN_INTERVAL_TICKS: u32 = 1;

/// Tracks per-actuator admission history so high-frequency actions can be
/// rate-limited against the control rate. Time is measured in control
/// ticks, not wall-clock, so the gate's behavior doesn't depend on how a
/// collaborator's clock is implemented.
#[derive(Debug, Default)]
pub struct SafetyGate {
    last_move_tick: Option<u32>,
}

impl SafetyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter a VM-committed action at the given tick. Returns `Some` if
    /// the action is admitted (and should pet the watchdog), `None` if it
    /// is rejected.
    pub fn admit(&mut self, action: Action, tick: u32) -> Option<Action> {
        if action.is_null() {
            return None;
        }

        if action.act_id == act_id::MOVE {
            if let Some(last) = self.last_move_tick {
                if tick.saturating_sub(last) < MOVE_MIN_INTERVAL_TICKS {
                    return None;
                }
            }
            self.last_move_tick = Some(tick);
        }

        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_action_is_rejected() {
        let mut gate = SafetyGate::new();
        assert_eq!(gate.admit(Action::NULL, 0), None);
    }

    #[test]
    fn stop_and_turn_are_never_rate_limited() {
        let mut gate = SafetyGate::new();
        let stop = Action { act_id: act_id::STOP, param: 0 };
        assert_eq!(gate.admit(stop, 0), Some(stop));
        assert_eq!(gate.admit(stop, 0), Some(stop));
    }

    #[test]
    fn move_is_rate_limited_to_one_per_tick() {
        let mut gate = SafetyGate::new();
        let mv = Action { act_id: act_id::MOVE, param: 10 };
        assert_eq!(gate.admit(mv, 10), Some(mv));
        assert_eq!(gate.admit(mv, 10), None);
        assert_eq!(gate.admit(mv, 11), Some(mv));
    }
}
