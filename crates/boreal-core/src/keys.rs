//! Session-static key material: the 128-bit MAC key and 256-bit cipher key
//! shared out of band between host and firmware.
//!
//! Keys are wrapped so the raw bytes are wiped from memory when dropped —
//! cheap to do, and independent of whether the primitives themselves run
//! constant-time (they don't; see the Non-goals).

use std::path::Path;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::chacha20::key_words;

#[derive(Error, Debug)]
pub enum KeyLoadError {
    #[error("failed to read key file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("key material must be exactly 48 bytes (16 MAC + 32 cipher), got {0}")]
    WrongLength(usize),
}

/// The two shared secrets provisioned out of band: a 128-bit MAC key and a
/// 256-bit cipher key. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    mac_key_bytes: [u8; 16],
    cipher_key_bytes: [u8; 32],
}

impl KeyMaterial {
    /// Construct directly from raw bytes (e.g. already loaded by a
    /// provisioning tool).
    pub fn from_bytes(mac_key_bytes: [u8; 16], cipher_key_bytes: [u8; 32]) -> Self {
        Self {
            mac_key_bytes,
            cipher_key_bytes,
        }
    }

    /// Load from a flat binary blob: 16 bytes MAC key followed by 32 bytes
    /// cipher key. This is the provisioning format written to the device
    /// at flash time; rotating keys means re-flashing this file, since
    /// dynamic key reload is out of scope for a session.
    pub fn load(path: &Path) -> Result<Self, KeyLoadError> {
        let bytes = std::fs::read(path).map_err(|source| KeyLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if bytes.len() != 48 {
            return Err(KeyLoadError::WrongLength(bytes.len()));
        }
        let mut mac_key_bytes = [0u8; 16];
        let mut cipher_key_bytes = [0u8; 32];
        mac_key_bytes.copy_from_slice(&bytes[0..16]);
        cipher_key_bytes.copy_from_slice(&bytes[16..48]);
        Ok(Self {
            mac_key_bytes,
            cipher_key_bytes,
        })
    }

    /// The MAC key as the two little-endian `u64` halves SipHash-2-4 wants.
    pub fn mac_key(&self) -> (u64, u64) {
        (
            u64::from_le_bytes(self.mac_key_bytes[0..8].try_into().unwrap()),
            u64::from_le_bytes(self.mac_key_bytes[8..16].try_into().unwrap()),
        )
    }

    /// The cipher key as the eight 32-bit words ChaCha20 wants.
    pub fn cipher_key(&self) -> [u32; 8] {
        key_words(&self.cipher_key_bytes)
    }
}
