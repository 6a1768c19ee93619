//! The ChaCha20 stream cipher — DJB's "legacy" 64-bit-nonce / 64-bit-counter
//! variant, not the IETF 96-bit-nonce / 32-bit-counter variant.
//!
//! State layout (sixteen 32-bit words, little-endian on the wire):
//!
//! ```text
//! [ const  const  const  const ]
//! [ key0   key1   key2   key3  ]
//! [ key4   key5   key6   key7  ]
//! [ ctr    nonce_lo nonce_hi 0 ]
//! ```
//!
//! Twenty rounds (ten column/diagonal double-rounds) of the quarter-round
//! function, then the original state is added back in word-wise. The block
//! function is pure; the stream cipher XORs successive blocks with the
//! caller's buffer, incrementing `counter` each block.
//!
//! Encryption and decryption are the same operation: applying the stream
//! twice with the same `(key, nonce, counter)` is the identity. Callers must
//! never reuse a `(key, nonce, counter)` triple to encrypt two different
//! buffers.

/// "expand 32-byte k" as four little-endian words.
const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

const ROUNDS: usize = 20;

#[inline]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

fn initial_state(key: &[u32; 8], nonce: u64, counter: u32) -> [u32; 16] {
    [
        CONSTANTS[0],
        CONSTANTS[1],
        CONSTANTS[2],
        CONSTANTS[3],
        key[0],
        key[1],
        key[2],
        key[3],
        key[4],
        key[5],
        key[6],
        key[7],
        counter,
        (nonce & 0xFFFF_FFFF) as u32,
        (nonce >> 32) as u32,
        0,
    ]
}

/// The ChaCha20 block function: one 64-byte keystream block for a given
/// `(key, nonce, counter)`.
pub fn chacha20_block(key: &[u32; 8], nonce: u64, counter: u32) -> [u8; 64] {
    let initial = initial_state(key, nonce, counter);
    let mut working = initial;

    for _ in 0..(ROUNDS / 2) {
        quarter_round(&mut working, 0, 4, 8, 12);
        quarter_round(&mut working, 1, 5, 9, 13);
        quarter_round(&mut working, 2, 6, 10, 14);
        quarter_round(&mut working, 3, 7, 11, 15);
        quarter_round(&mut working, 0, 5, 10, 15);
        quarter_round(&mut working, 1, 6, 11, 12);
        quarter_round(&mut working, 2, 7, 8, 13);
        quarter_round(&mut working, 3, 4, 9, 14);
    }

    let mut out = [0u8; 64];
    for i in 0..16 {
        let word = working[i].wrapping_add(initial[i]);
        out[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// XOR `buf` in place with the ChaCha20 keystream derived from
/// `(key, nonce, counter)`. The same call encrypts or decrypts. The final
/// chunk is truncated to whatever remains of `buf`, not padded.
pub fn chacha20_xor_stream(key: &[u32; 8], nonce: u64, counter: u32, buf: &mut [u8]) {
    let mut block_counter = counter;
    for chunk in buf.chunks_mut(64) {
        let keystream = chacha20_block(key, nonce, block_counter);
        for (b, k) in chunk.iter_mut().zip(keystream.iter()) {
            *b ^= k;
        }
        block_counter = block_counter.wrapping_add(1);
    }
}

/// Unpack a 32-byte little-endian key into eight 32-bit words.
pub fn key_words(key_bytes: &[u8; 32]) -> [u32; 8] {
    let mut words = [0u32; 8];
    for (i, word) in words.iter_mut().enumerate() {
        *word = u32::from_le_bytes(key_bytes[i * 4..i * 4 + 4].try_into().unwrap());
    }
    words
}
