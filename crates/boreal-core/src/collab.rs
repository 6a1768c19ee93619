//! Seams for the collaborators this core is driven by and drives: the
//! serial/SPI transport, the wall clock, the motor driver, and the AI
//! inference source of intents (§6). None of these are implemented here —
//! only their interfaces — so that `boreald`/`boreal-hostd` can run against
//! real hardware while tests and `demos/boreal-sim` run against in-memory
//! stand-ins.

/// A half-duplex or full-duplex byte transport carrying wire frames.
///
/// The decoder must tolerate partial reads: `read` may return fewer bytes
/// than requested, and callers are expected to buffer until a full frame
/// (`wire::FRAME_LEN` bytes) is available before processing it.
pub trait SerialLink {
    type Error: std::fmt::Debug;

    /// Read up to `buf.len()` bytes, returning the number actually read.
    /// `0` means no data is currently available, not end-of-stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write the full buffer, blocking until it is sent.
    fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

/// Wall-clock milliseconds, truncated to the lower 32 bits for `t_ms`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// The actuator backend: commits a PWM value per motor and reports back
/// the realized velocity. The mapping from PWM to velocity (the physical
/// plant) is owned entirely by the implementor — the core's contract ends
/// at "this PWM value was committed this tick".
pub trait MotorDriver {
    fn set_pwm(&mut self, motor_id: usize, pwm: i32);
    fn read_velocity(&self, motor_id: usize) -> f32;
}

/// The host-side source of AI-inferred intents.
pub trait IntentSource {
    /// Produce the next intent to transmit: `(intent_id, conf_q15, aux)`.
    /// Returns `None` when no new intent is ready this tick (the host
    /// simply does not send a frame).
    fn next(&mut self) -> Option<(u16, u16, Vec<i16>)>;
}
