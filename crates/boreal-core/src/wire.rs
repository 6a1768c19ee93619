//! The brainstem's wire format. Every field, every size, every byte order
//! here is part of the protocol: it must be bit-exact between the host
//! sender and the firmware receiver.
//!
//! Frame layout (66 bytes total):
//!
//! ```text
//! [ 0x01 ][ 0x40 ][  16-byte header  ][ 40-byte ciphertext ][ 8-byte MAC ]
//!    1       1            16                  40                  8
//! ```
//!
//! The MAC covers the 56-byte payload (header ‖ ciphertext). The cipher
//! nonce is the frame's `seq`, widened to 64 bits; the initial block
//! counter is always 0. Sequence bookkeeping (`last_seq`) is *not* owned by
//! this module — `decode` takes it as an input and the caller commits the
//! update only after a fully successful decode, matching the ordering
//! contract in the component design (MAC check before any use of header or
//! ciphertext content; sequence update only after full success).

use crate::chacha20::chacha20_xor_stream;
use crate::intent::{IntentPacket, INTENT_PACKET_LEN};
use crate::siphash::siphash24;

pub const FRAME_PREFIX: u8 = 0x01;
/// Fixed frame length byte. Despite the name, this does not track the
/// actual ciphertext length (40) — it is a constant `0x40` required by the
/// wire format, carried over unchanged from the reference protocol.
pub const FRAME_LEN_BYTE: u8 = 0x40;
pub const MAGIC: u32 = 0xB0A1_E1A1;
pub const PROTOCOL_VERSION: u16 = 1;

const HEADER_LEN: usize = 16;
const PAYLOAD_LEN: usize = HEADER_LEN + INTENT_PACKET_LEN; // 56
const MAC_LEN: usize = 8;
pub const FRAME_LEN: usize = 2 + PAYLOAD_LEN + MAC_LEN; // 66

// Compile-time size guards on the bit-exact wire layout (§6).
static_assertions::const_assert_eq!(HEADER_LEN, 16);
static_assertions::const_assert_eq!(PAYLOAD_LEN, 56);
static_assertions::const_assert_eq!(FRAME_LEN, 66);

/// The 16-byte authenticated header preceding the ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub magic: u32,
    pub version: u16,
    pub model_id: u16,
    pub seq: u32,
    pub t_ms: u32,
}

impl FrameHeader {
    fn pack(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&self.magic.to_le_bytes());
        out[4..6].copy_from_slice(&self.version.to_le_bytes());
        out[6..8].copy_from_slice(&self.model_id.to_le_bytes());
        out[8..12].copy_from_slice(&self.seq.to_le_bytes());
        out[12..16].copy_from_slice(&self.t_ms.to_le_bytes());
        out
    }

    fn unpack(bytes: &[u8; HEADER_LEN]) -> Self {
        Self {
            magic: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            version: u16::from_le_bytes(bytes[4..6].try_into().unwrap()),
            model_id: u16::from_le_bytes(bytes[6..8].try_into().unwrap()),
            seq: u32::from_le_bytes(bytes[8..12].try_into().unwrap()),
            t_ms: u32::from_le_bytes(bytes[12..16].try_into().unwrap()),
        }
    }
}

/// Errors a receiver can observe while decoding a frame. Every variant is
/// handled locally by the caller (drop the frame, log, continue) — none of
/// these propagate past the ingest step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("frame is {actual} bytes, expected {expected}")]
    Truncated { expected: usize, actual: usize },

    #[error("frame prefix byte invalid: expected 0x{expected:02x}, got 0x{actual:02x}")]
    FramePrefix { expected: u8, actual: u8 },

    #[error("frame length byte invalid: expected 0x{expected:02x}, got 0x{actual:02x}")]
    FrameLength { expected: u8, actual: u8 },

    #[error("MAC verification failed")]
    MacFail,

    #[error("magic mismatch: expected 0x{expected:08x}, got 0x{actual:08x}")]
    MagicFail { expected: u32, actual: u32 },

    #[error("replay detected: seq {seq} <= last_seq {last_seq}")]
    Replay { seq: u32, last_seq: u32 },
}

/// A successfully decoded frame: the authenticated header plus the
/// decrypted intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame {
    pub header: FrameHeader,
    pub intent: IntentPacket,
}

/// Encode `intent` into a 66-byte frame under `(cipher_key, mac_key)`.
///
/// `seq` must be strictly greater than any previously used `seq` for this
/// sender — it doubles as the stream-cipher nonce, so reuse breaks
/// confidentiality of the two frames that share it.
pub fn encode(
    cipher_key: &[u32; 8],
    mac_key: (u64, u64),
    model_id: u16,
    seq: u32,
    t_ms: u32,
    intent: &IntentPacket,
) -> [u8; FRAME_LEN] {
    let mut ciphertext = intent.pack();
    chacha20_xor_stream(cipher_key, seq as u64, 0, &mut ciphertext);

    let header = FrameHeader {
        magic: MAGIC,
        version: PROTOCOL_VERSION,
        model_id,
        seq,
        t_ms,
    };

    let mut payload = [0u8; PAYLOAD_LEN];
    payload[..HEADER_LEN].copy_from_slice(&header.pack());
    payload[HEADER_LEN..].copy_from_slice(&ciphertext);

    let mac = siphash24(mac_key.0, mac_key.1, &payload);

    let mut frame = [0u8; FRAME_LEN];
    frame[0] = FRAME_PREFIX;
    frame[1] = FRAME_LEN_BYTE;
    frame[2..2 + PAYLOAD_LEN].copy_from_slice(&payload);
    frame[2 + PAYLOAD_LEN..].copy_from_slice(&mac);
    frame
}

/// Decode and authenticate a 66-byte frame.
///
/// `last_seq` is read-only here: on success the caller is responsible for
/// committing `last_seq := header.seq`. The MAC is checked before the magic
/// or sequence number are ever inspected, and before the ciphertext is
/// touched.
pub fn decode(
    cipher_key: &[u32; 8],
    mac_key: (u64, u64),
    last_seq: u32,
    frame: &[u8],
) -> Result<DecodedFrame, WireError> {
    if frame.len() != FRAME_LEN {
        return Err(WireError::Truncated {
            expected: FRAME_LEN,
            actual: frame.len(),
        });
    }
    if frame[0] != FRAME_PREFIX {
        return Err(WireError::FramePrefix {
            expected: FRAME_PREFIX,
            actual: frame[0],
        });
    }
    if frame[1] != FRAME_LEN_BYTE {
        return Err(WireError::FrameLength {
            expected: FRAME_LEN_BYTE,
            actual: frame[1],
        });
    }

    let payload = &frame[2..2 + PAYLOAD_LEN];
    let mac = &frame[2 + PAYLOAD_LEN..];

    let expected_mac = siphash24(mac_key.0, mac_key.1, payload);
    if expected_mac != mac {
        return Err(WireError::MacFail);
    }

    let header_bytes: [u8; HEADER_LEN] = payload[..HEADER_LEN].try_into().unwrap();
    let header = FrameHeader::unpack(&header_bytes);

    if header.magic != MAGIC {
        return Err(WireError::MagicFail {
            expected: MAGIC,
            actual: header.magic,
        });
    }
    if header.seq <= last_seq {
        return Err(WireError::Replay {
            seq: header.seq,
            last_seq,
        });
    }

    let mut ciphertext: [u8; INTENT_PACKET_LEN] = payload[HEADER_LEN..].try_into().unwrap();
    chacha20_xor_stream(cipher_key, header.seq as u64, 0, &mut ciphertext);
    let intent = IntentPacket::unpack(&ciphertext);

    Ok(DecodedFrame { header, intent })
}
