//! The companion manifest shipped alongside a compiled bytecode image,
//! recording its SHA-256 for integrity checking before the firmware loads
//! it. The reference compiler wrote this as a comment line in a generated
//! C header (`// SHA256: <hex>`); this is the same intent expressed as a
//! sibling TOML file instead of baking it into a generated source file.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyManifest {
    /// Hex-encoded SHA-256 of the bytecode blob.
    pub sha256: String,
    /// Number of opcodes compiled (useful for a quick sanity check before
    /// comparing hashes).
    pub opcode_count: usize,
    /// Source DSL file this was compiled from, for traceability.
    pub source_file: String,
    /// `boreal-policy` crate version that produced this manifest.
    pub compiler_version: String,
}

impl PolicyManifest {
    pub fn for_bytecode(bytecode: &[u8], source_file: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytecode);
        let digest = hasher.finalize();
        Self {
            sha256: hex::encode(digest),
            opcode_count: count_opcodes(bytecode),
            source_file: source_file.to_string(),
            compiler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Verify a loaded bytecode blob against this manifest's recorded hash.
    pub fn verify(&self, bytecode: &[u8]) -> bool {
        let mut hasher = Sha256::new();
        hasher.update(bytecode);
        hex::encode(hasher.finalize()) == self.sha256
    }
}

/// A rough opcode count for the manifest's sanity-check field. Not a
/// substitute for the hash check — just walks the stream using each
/// opcode's known width so a manifest can report something more legible
/// than raw byte length.
fn count_opcodes(bytecode: &[u8]) -> usize {
    use crate::opcodes::{OP_DENY, OP_END, OP_IF, OP_REQUIRE_PREV, OP_SET};

    let mut pc = 0;
    let mut count = 0;
    while pc < bytecode.len() {
        let op = bytecode[pc];
        let width = match op {
            OP_IF => 5,
            OP_SET => 4,
            OP_REQUIRE_PREV => 2,
            OP_DENY | OP_END => 1,
            _ => break, // malformed trailing bytes; stop counting rather than panic
        };
        count += 1;
        pc += width;
    }
    count
}
