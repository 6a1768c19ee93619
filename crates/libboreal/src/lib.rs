//! libboreal — a single dependency for anything embedding the brainstem
//! pipeline (demos, integration tests, future bindings) instead of pulling
//! in `boreal-core`, `boreal-policy`, and `boreal-services` separately.

pub use boreal_core::{
    chacha20, collab, config, intent, keys, siphash, wire, Action, DecodedFrame, IntentPacket,
    WireError,
};
pub use boreal_policy::{compile, CompileError, PolicyManifest};
pub use boreal_services::{gate, motor, vm, watchdog, Brainstem};
