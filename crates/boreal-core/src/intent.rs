//! Fixed-width records carried across the wire: the plaintext intent
//! packet and the VM's output action.
//!
//! Both are tagged records with a fixed schema, not dynamic maps — the
//! aux slots and the act_id/param pair must serialize bit-for-bit the same
//! way on every build, so their layout is spelled out explicitly rather
//! than derived.

/// Number of auxiliary parameter slots carried with every intent.
pub const AUX_LEN: usize = 18;

/// The 40-byte plaintext intent packet (§3 of the wire format).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentPacket {
    pub intent_id: u16,
    pub conf_q15: u16,
    pub aux: [i16; AUX_LEN],
}

/// Wire size of [`IntentPacket`] once packed.
pub const INTENT_PACKET_LEN: usize = 2 + 2 + AUX_LEN * 2;

// Compile-time size guard: if this ever stops being 40, the wire format has
// silently changed underneath the protocol's bit-exactness contract.
static_assertions::const_assert_eq!(INTENT_PACKET_LEN, 40);

impl IntentPacket {
    /// Build a packet, padding or truncating `aux` to exactly
    /// [`AUX_LEN`] slots. Unused slots are zero.
    pub fn new(intent_id: u16, conf_q15: u16, aux: &[i16]) -> Self {
        let mut fixed = [0i16; AUX_LEN];
        let n = aux.len().min(AUX_LEN);
        fixed[..n].copy_from_slice(&aux[..n]);
        Self {
            intent_id,
            conf_q15,
            aux: fixed,
        }
    }

    /// Pack into the 40-byte little-endian wire representation.
    pub fn pack(&self) -> [u8; INTENT_PACKET_LEN] {
        let mut out = [0u8; INTENT_PACKET_LEN];
        out[0..2].copy_from_slice(&self.intent_id.to_le_bytes());
        out[2..4].copy_from_slice(&self.conf_q15.to_le_bytes());
        for (i, v) in self.aux.iter().enumerate() {
            let off = 4 + i * 2;
            out[off..off + 2].copy_from_slice(&v.to_le_bytes());
        }
        out
    }

    /// Unpack from a 40-byte little-endian buffer.
    pub fn unpack(bytes: &[u8; INTENT_PACKET_LEN]) -> Self {
        let intent_id = u16::from_le_bytes(bytes[0..2].try_into().unwrap());
        let conf_q15 = u16::from_le_bytes(bytes[2..4].try_into().unwrap());
        let mut aux = [0i16; AUX_LEN];
        for (i, slot) in aux.iter_mut().enumerate() {
            let off = 4 + i * 2;
            *slot = i16::from_le_bytes(bytes[off..off + 2].try_into().unwrap());
        }
        Self {
            intent_id,
            conf_q15,
            aux,
        }
    }
}

/// Known intent identifiers (§3, §GLOSSARY).
pub mod intent_id {
    pub const NONE: u16 = 0;
    pub const STOP: u16 = 1;
    pub const MOVE: u16 = 2;
    pub const TURN: u16 = 3;
}

/// Known actuator identifiers (§4.7, §GLOSSARY).
pub mod act_id {
    pub const NULL: u8 = 0;
    pub const STOP: u8 = 1;
    pub const MOVE: u8 = 2;
    pub const TURN: u8 = 3;
}

/// The decision VM's output: an actuator command, or the null action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Action {
    pub act_id: u8,
    pub param: i16,
}

impl Action {
    pub const NULL: Action = Action {
        act_id: act_id::NULL,
        param: 0,
    };

    pub fn is_null(&self) -> bool {
        self.act_id == act_id::NULL
    }
}
