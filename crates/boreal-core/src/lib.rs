//! boreal-core — primitives, wire format, fixed-width records, and the
//! collaborator interfaces shared by the host sender and the firmware
//! brainstem.
//!
//! Nothing in this crate holds mutable session state: `chacha20`/`siphash`
//! are pure functions, `wire::encode`/`decode` are pure given the keys and
//! `last_seq`, and `intent`'s records are plain data. Sequence counters,
//! PID integrators, and watchdog timers belong to `boreal-services` and
//! the two binaries built on top of it.

pub mod chacha20;
pub mod collab;
pub mod config;
pub mod intent;
pub mod keys;
pub mod siphash;
pub mod wire;

pub use intent::{Action, IntentPacket};
pub use wire::{DecodedFrame, WireError};
