//! hadro Testkit - Deterministic reference engine
//!
//! [`Minijet`] is a seeded, fully in-process toy minimum-bias generator
//! implementing the [`hadro_session::Backend`] contract. It stands in for
//! the native Fortran engines in tests, benches, and demos: same storage
//! discipline (fixed native arrays overwritten in place, 1-based lineage),
//! same lifecycle constraints, reference cross sections at the 10 GeV pp
//! point.

pub mod minijet;

pub use minijet::*;
