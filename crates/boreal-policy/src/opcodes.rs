//! Bytecode opcode bytes and the physical-bound table. Shared vocabulary
//! between the compiler (here) and the decision VM (`boreal-services`) —
//! kept as bare constants rather than an enum so both sides agree on the
//! exact byte values without needing to share a dependency on each other.

pub const OP_IF: u8 = 0x01;
pub const OP_SET: u8 = 0x02;
pub const OP_DENY: u8 = 0x03;
pub const OP_REQUIRE_PREV: u8 = 0x04;
pub const OP_END: u8 = 0xFF;

/// Physical bound (inclusive min, inclusive max) per actuator id. Enforced
/// only at compile time — the VM trusts the bytecode.
pub fn bounds(act_id: u8) -> Option<(i16, i16)> {
    match act_id {
        1 => Some((0, 1)),
        2 => Some((-50, 50)),
        3 => Some((-30, 30)),
        _ => None,
    }
}
