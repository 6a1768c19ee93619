//! The decision VM: a tiny bounded-step interpreter that turns a decoded
//! intent into an actuator command by walking compiled policy bytecode.
//! Nothing here parses text or checks physical bounds — that already
//! happened at compile time, on the host, in `boreal-policy`.

use boreal_core::intent::{act_id, Action};
use boreal_core::IntentPacket;
use boreal_policy::opcodes::{OP_DENY, OP_END, OP_IF, OP_REQUIRE_PREV, OP_SET};

/// Anti-runaway guard: a well-formed policy is a short straight-line or
/// lightly branching program. 32 opcodes is generous headroom over any
/// policy this firmware is expected to carry.
pub const MAX_STEPS: u32 = 32;

/// Execute `bytecode` against `packet`, given the previously committed
/// actuator id (0 if none yet, per the bootstrap exemption in
/// `OP_REQUIRE_PREV`). Returns the committed action and the actuator id to
/// remember as `prev_act_id` going forward.
///
/// Malformed bytecode (truncated operands, an opcode byte that doesn't
/// match any of the four known ones) is treated the same as running out of
/// steps: evaluation stops and the null action is returned. The VM never
/// panics on a bytecode image, however it was produced.
pub fn run(bytecode: &[u8], packet: &IntentPacket, prev_act_id: u8) -> (Action, u8) {
    let mut pc = 0usize;
    let mut steps = 0u32;
    let mut cond_failed = false;

    while steps < MAX_STEPS {
        steps += 1;
        let Some(&op) = bytecode.get(pc) else {
            return (Action::NULL, prev_act_id);
        };

        match op {
            OP_IF => {
                let Some(operand) = bytecode.get(pc + 1..pc + 5) else {
                    return (Action::NULL, prev_act_id);
                };
                let intent_id = u16::from_le_bytes([operand[0], operand[1]]);
                let min_conf = u16::from_le_bytes([operand[2], operand[3]]);
                cond_failed = packet.intent_id != intent_id || packet.conf_q15 < min_conf;
                pc += 5;
            }
            OP_REQUIRE_PREV => {
                let Some(&required) = bytecode.get(pc + 1) else {
                    return (Action::NULL, prev_act_id);
                };
                if prev_act_id != required && prev_act_id != act_id::NULL {
                    cond_failed = true;
                }
                pc += 2;
            }
            OP_SET => {
                let Some(operand) = bytecode.get(pc + 1..pc + 4) else {
                    return (Action::NULL, prev_act_id);
                };
                let act = operand[0];
                let param = i16::from_le_bytes([operand[1], operand[2]]);
                if cond_failed {
                    pc += 4;
                } else {
                    return (Action { act_id: act, param }, act);
                }
            }
            OP_DENY => {
                return (Action::NULL, act_id::NULL);
            }
            OP_END => {
                return (Action::NULL, prev_act_id);
            }
            _ => return (Action::NULL, prev_act_id),
        }
    }

    (Action::NULL, prev_act_id)
}
