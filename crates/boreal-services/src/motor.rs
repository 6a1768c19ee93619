//! The two-motor PID controller: translates an admitted action into target
//! velocities, then closes the loop against whatever velocity the
//! collaborator's motor driver reports, once per control tick.

use boreal_core::collab::MotorDriver;
use boreal_core::intent::act_id;
use boreal_core::Action;

pub const CONTROL_HZ: f32 = 50.0;
pub const MAX_INTEGRAL: f32 = 100.0;
pub const MAX_PWM: i32 = 1000;

const KP: f32 = 1.0;
const KI: f32 = 0.1;
const KD: f32 = 0.05;

#[derive(Debug, Clone, Copy, Default)]
struct MotorState {
    target: f32,
    integral: f32,
    prev_error: f32,
}

impl MotorState {
    fn reset_integral(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
    }
}

/// Two-motor controller. Motor 0 and motor 1 are driven independently but
/// share the same gains and tick rate.
#[derive(Debug, Default)]
pub struct MotorController {
    motors: [MotorState; 2],
}

impl MotorController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an admitted action's target velocities (§4.7's action table).
    /// Actions other than STOP/MOVE/TURN leave targets unchanged.
    pub fn apply_action(&mut self, action: Action) {
        let v = action.param as f32 / 100.0;
        match action.act_id {
            act_id::STOP => {
                self.motors[0].target = 0.0;
                self.motors[1].target = 0.0;
            }
            act_id::MOVE => {
                self.motors[0].target = v;
                self.motors[1].target = v;
            }
            act_id::TURN => {
                self.motors[0].target = v;
                self.motors[1].target = -v;
            }
            _ => {}
        }
    }

    /// Zero both targets and reset both integrators, as done on watchdog
    /// safe-state entry.
    pub fn zero_and_reset(&mut self) {
        for m in &mut self.motors {
            m.target = 0.0;
            m.reset_integral();
        }
    }

    pub fn target(&self, motor_id: usize) -> f32 {
        self.motors[motor_id].target
    }

    pub fn integral(&self, motor_id: usize) -> f32 {
        self.motors[motor_id].integral
    }

    /// Run one PID step against the driver's reported velocity for each
    /// motor, committing the resulting PWM back to the driver.
    pub fn step<D: MotorDriver>(&mut self, driver: &mut D) {
        for id in 0..2 {
            let velocity = driver.read_velocity(id);
            let m = &mut self.motors[id];
            let e = m.target - velocity;
            m.integral = (m.integral + e / CONTROL_HZ).clamp(-MAX_INTEGRAL, MAX_INTEGRAL);
            let d = (e - m.prev_error) * CONTROL_HZ;
            m.prev_error = e;
            let u = KP * e + KI * m.integral + KD * d;
            let pwm = u.clamp(-(MAX_PWM as f32), MAX_PWM as f32) as i32;
            driver.set_pwm(id, pwm);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeDriver {
        velocity: [f32; 2],
        last_pwm: RefCell<[i32; 2]>,
    }

    impl MotorDriver for FakeDriver {
        fn set_pwm(&mut self, motor_id: usize, pwm: i32) {
            self.last_pwm.borrow_mut()[motor_id] = pwm;
        }
        fn read_velocity(&self, motor_id: usize) -> f32 {
            self.velocity[motor_id]
        }
    }

    #[test]
    fn stop_zeroes_both_targets() {
        let mut ctl = MotorController::new();
        ctl.apply_action(Action { act_id: act_id::MOVE, param: 50 });
        ctl.apply_action(Action { act_id: act_id::STOP, param: 0 });
        assert_eq!(ctl.target(0), 0.0);
        assert_eq!(ctl.target(1), 0.0);
    }

    #[test]
    fn move_sets_both_targets_equal() {
        let mut ctl = MotorController::new();
        ctl.apply_action(Action { act_id: act_id::MOVE, param: 50 });
        assert_eq!(ctl.target(0), 0.5);
        assert_eq!(ctl.target(1), 0.5);
    }

    #[test]
    fn turn_sets_opposite_targets() {
        let mut ctl = MotorController::new();
        ctl.apply_action(Action { act_id: act_id::TURN, param: 30 });
        assert_eq!(ctl.target(0), 0.3);
        assert_eq!(ctl.target(1), -0.3);
    }

    #[test]
    fn pid_step_drives_pwm_toward_target_error_sign() {
        let mut ctl = MotorController::new();
        ctl.apply_action(Action { act_id: act_id::MOVE, param: 100 });
        let mut driver = FakeDriver { velocity: [0.0, 0.0], last_pwm: RefCell::new([0, 0]) };
        ctl.step(&mut driver);
        assert!(driver.last_pwm.borrow()[0] > 0);
        assert!(driver.last_pwm.borrow()[1] > 0);
    }

    #[test]
    fn integral_never_exceeds_max_integral() {
        let mut ctl = MotorController::new();
        ctl.apply_action(Action { act_id: act_id::MOVE, param: 100 });
        let mut driver = FakeDriver { velocity: [0.0, 0.0], last_pwm: RefCell::new([0, 0]) };
        for _ in 0..100_000 {
            ctl.step(&mut driver);
        }
        assert!(ctl.integral(0).abs() <= MAX_INTEGRAL);
        assert!(ctl.integral(1).abs() <= MAX_INTEGRAL);
    }

    #[test]
    fn zero_and_reset_clears_targets_and_integrals() {
        let mut ctl = MotorController::new();
        ctl.apply_action(Action { act_id: act_id::MOVE, param: 100 });
        let mut driver = FakeDriver { velocity: [0.0, 0.0], last_pwm: RefCell::new([0, 0]) };
        ctl.step(&mut driver);
        ctl.zero_and_reset();
        assert_eq!(ctl.target(0), 0.0);
        assert_eq!(ctl.integral(0), 0.0);
    }
}
