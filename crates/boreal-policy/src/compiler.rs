//! The policy DSL compiler: a line-oriented safety language compiled
//! offline, on the host, into the bytecode the brainstem's decision VM
//! executes. This is the only place physical bounds are checked — the VM
//! trusts whatever bytecode it is handed.
//!
//! Grammar (one statement per line, `#` starts an end-of-line comment,
//! blank lines ignored):
//!
//! ```text
//! IF INTENT == <id> AND CONF >= <conf>
//! REQUIRE_PREV <act_id>
//! ACT <act_id> <param>
//! DEFAULT DENY
//! ```
//!
//! A policy must contain exactly one `DEFAULT DENY`, which terminates
//! compilation — anything after it is ignored, matching the reference
//! compiler's `break` on first sight of it. Its absence is a fatal error:
//! no partially compiled image is ever emitted.

use crate::opcodes::{bounds, OP_DENY, OP_END, OP_IF, OP_REQUIRE_PREV, OP_SET};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("line {line}: actuator {act_id} param {param} is out of physical bounds [{min}, {max}]")]
    OutOfBounds {
        line: usize,
        act_id: u8,
        param: i16,
        min: i16,
        max: i16,
    },

    #[error("line {line}: actuator id {act_id} has no physical bound table entry")]
    UnknownActuator { line: usize, act_id: u8 },

    #[error("policy must end with DEFAULT DENY; none was found")]
    MissingDefaultDeny,

    #[error("line {line}: malformed IF statement: {text:?}")]
    MalformedIf { line: usize, text: String },

    #[error("line {line}: malformed REQUIRE_PREV statement: {text:?}")]
    MalformedRequirePrev { line: usize, text: String },

    #[error("line {line}: malformed ACT statement: {text:?}")]
    MalformedAct { line: usize, text: String },

    #[error("line {line}: unrecognized statement: {text:?}")]
    UnknownStatement { line: usize, text: String },

    #[error("line {line}: expected a number, got {text:?}")]
    InvalidNumber { line: usize, text: String },
}

fn parse_u16(line: usize, token: &str) -> Result<u16, CompileError> {
    token.parse().map_err(|_| CompileError::InvalidNumber {
        line,
        text: token.to_string(),
    })
}

fn parse_u8(line: usize, token: &str) -> Result<u8, CompileError> {
    token.parse().map_err(|_| CompileError::InvalidNumber {
        line,
        text: token.to_string(),
    })
}

fn parse_i16(line: usize, token: &str) -> Result<i16, CompileError> {
    token.parse().map_err(|_| CompileError::InvalidNumber {
        line,
        text: token.to_string(),
    })
}

/// Strip a trailing `#` comment and surrounding whitespace; `None` if the
/// line is blank afterwards.
fn clean_line(raw: &str) -> Option<&str> {
    let without_comment = raw.split('#').next().unwrap_or("");
    let trimmed = without_comment.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Compile DSL source text into a bytecode image.
pub fn compile(source: &str) -> Result<Vec<u8>, CompileError> {
    let mut bc = Vec::new();
    let mut has_default = false;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let Some(line) = clean_line(raw_line) else {
            continue;
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.first().copied() {
            Some("IF") => {
                // IF INTENT == <id> AND CONF >= <conf>
                if parts.len() != 8
                    || parts[2] != "=="
                    || !parts[4].eq_ignore_ascii_case("and")
                    || !parts[5].eq_ignore_ascii_case("conf")
                    || parts[6] != ">="
                {
                    return Err(CompileError::MalformedIf {
                        line: line_no,
                        text: line.to_string(),
                    });
                }
                let intent_id = parse_u16(line_no, parts[3])?;
                let min_conf = parse_u16(line_no, parts[7])?;
                bc.push(OP_IF);
                bc.extend_from_slice(&intent_id.to_le_bytes());
                bc.extend_from_slice(&min_conf.to_le_bytes());
            }
            Some("REQUIRE_PREV") => {
                if parts.len() != 2 {
                    return Err(CompileError::MalformedRequirePrev {
                        line: line_no,
                        text: line.to_string(),
                    });
                }
                let act_id = parse_u8(line_no, parts[1])?;
                bc.push(OP_REQUIRE_PREV);
                bc.push(act_id);
            }
            Some("ACT") => {
                if parts.len() != 3 {
                    return Err(CompileError::MalformedAct {
                        line: line_no,
                        text: line.to_string(),
                    });
                }
                let act_id = parse_u8(line_no, parts[1])?;
                let param = parse_i16(line_no, parts[2])?;
                let (min, max) = bounds(act_id).ok_or(CompileError::UnknownActuator {
                    line: line_no,
                    act_id,
                })?;
                if param < min || param > max {
                    return Err(CompileError::OutOfBounds {
                        line: line_no,
                        act_id,
                        param,
                        min,
                        max,
                    });
                }
                bc.push(OP_SET);
                bc.push(act_id);
                bc.extend_from_slice(&param.to_le_bytes());
            }
            Some("DEFAULT") if parts.get(1) == Some(&"DENY") => {
                bc.push(OP_DENY);
                has_default = true;
                break;
            }
            _ => {
                return Err(CompileError::UnknownStatement {
                    line: line_no,
                    text: line.to_string(),
                });
            }
        }
    }

    if !has_default {
        return Err(CompileError::MissingDefaultDeny);
    }
    bc.push(OP_END);
    Ok(bc)
}
