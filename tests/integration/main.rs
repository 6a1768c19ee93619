//! Cross-crate integration tests for the brainstem pipeline: frame codec,
//! policy compiler, decision VM, and the full ingest→VM→gate→motor→watchdog
//! sequence, exercised the way `boreald`/`boreal-hostd` actually wire them
//! together rather than unit-by-unit.

mod brainstem_loop;
mod frame_roundtrip;
mod policy_compile;
