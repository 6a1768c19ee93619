//! Scenario 5 from the testable-properties list: compile a concrete policy
//! and check the decision VM's admissible/denied boundary against it, plus
//! the compiler's fatal-error paths that a hand-authored DSL file can hit.

use boreal_core::intent::{act_id, intent_id};
use boreal_core::IntentPacket;
use boreal_policy::{compile, CompileError};
use boreal_services::vm;

const POLICY: &str = "\
IF INTENT == 2 AND CONF >= 25000
ACT 2 50
DEFAULT DENY
";

#[test]
fn confident_matching_intent_is_admitted() {
    let bc = compile(POLICY).unwrap();
    let packet = IntentPacket::new(intent_id::MOVE, 27000, &[]);
    let (action, prev) = vm::run(&bc, &packet, 0);
    assert_eq!(action.act_id, act_id::MOVE);
    assert_eq!(action.param, 50);
    assert_eq!(prev, act_id::MOVE);
}

#[test]
fn low_confidence_matching_intent_is_denied() {
    let bc = compile(POLICY).unwrap();
    let packet = IntentPacket::new(intent_id::MOVE, 20000, &[]);
    let (action, _) = vm::run(&bc, &packet, 0);
    assert!(action.is_null());
}

#[test]
fn confident_but_wrong_intent_is_denied() {
    let bc = compile(POLICY).unwrap();
    let packet = IntentPacket::new(intent_id::TURN, 32000, &[]);
    let (action, _) = vm::run(&bc, &packet, 0);
    assert!(action.is_null());
}

#[test]
fn policy_missing_default_deny_fails_to_compile() {
    let source = "IF INTENT == 1 AND CONF >= 0\nACT 1 1\n";
    let err = compile(source).unwrap_err();
    assert_eq!(err, CompileError::MissingDefaultDeny);
}

#[test]
fn policy_with_out_of_bound_actuator_param_fails_to_compile() {
    // act_id 3 (TURN) bound is [-30, 30]; 31 is one past the edge.
    let source = "ACT 3 31\nDEFAULT DENY\n";
    let err = compile(source).unwrap_err();
    assert_eq!(
        err,
        CompileError::OutOfBounds {
            line: 1,
            act_id: 3,
            param: 31,
            min: -30,
            max: 30,
        }
    );
}

#[test]
fn require_prev_gated_policy_enforces_sequencing() {
    let source = "IF INTENT == 1 AND CONF >= 0\nACT 1 1\nREQUIRE_PREV 1\nIF INTENT == 2 AND CONF >= 0\nACT 2 10\nDEFAULT DENY\n";
    let bc = compile(source).unwrap();

    // First commit STOP (act_id 1) from a cold boot (prev_act_id 0 is exempt).
    let stop_intent = IntentPacket::new(intent_id::STOP, 0, &[]);
    let (stop_action, prev) = vm::run(&bc, &stop_intent, 0);
    assert_eq!(stop_action.act_id, act_id::STOP);

    // A MOVE intent is only admitted once prev_act_id is STOP.
    let move_intent = IntentPacket::new(intent_id::MOVE, 0, &[]);
    let (move_action, _) = vm::run(&bc, &move_intent, prev);
    assert_eq!(move_action.act_id, act_id::MOVE);
    assert_eq!(move_action.param, 10);
}
