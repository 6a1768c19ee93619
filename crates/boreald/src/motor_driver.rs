//! A placeholder [`boreal_core::collab::MotorDriver`] used until a real
//! actuator backend (motor controller board, GPIO PWM, etc.) is wired in.
//! Models each motor as a first-order lag toward whatever PWM was last
//! committed, just enough for the control loop to have real feedback
//! instead of a constant.

use boreal_core::collab::MotorDriver;

pub struct LaggedMotorDriver {
    velocity: [f32; 2],
    pwm: [i32; 2],
}

impl LaggedMotorDriver {
    pub fn new() -> Self {
        Self {
            velocity: [0.0; 2],
            pwm: [0; 2],
        }
    }

    /// Advance the simulated plant by one control tick. Call after
    /// `Brainstem::control_tick` has committed this tick's PWM.
    pub fn settle(&mut self) {
        const LAG: f32 = 0.2;
        for id in 0..2 {
            let target_velocity = self.pwm[id] as f32 / 1000.0;
            self.velocity[id] += (target_velocity - self.velocity[id]) * LAG;
        }
    }
}

impl MotorDriver for LaggedMotorDriver {
    fn set_pwm(&mut self, motor_id: usize, pwm: i32) {
        tracing::debug!(motor_id, pwm, "set_pwm");
        self.pwm[motor_id] = pwm;
    }

    fn read_velocity(&self, motor_id: usize) -> f32 {
        self.velocity[motor_id]
    }
}
