//! Particle status codes
//!
//! Engines disagree on most status values, but every supported family maps
//! its stack onto the HEPEVT convention before the front-end sees it:
//! `1` final state, `2` decayed or fragmented, `3` documentation (beams).

/// Stable particle, present in the observable final state.
pub const FINAL_STATE: i32 = 1;

/// Decayed or fragmented intermediate particle.
pub const DECAYED: i32 = 2;

/// Documentation entry (beam particles, internal bookkeeping).
pub const DOCUMENTATION: i32 = 3;
