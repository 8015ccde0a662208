//! hadro Core - Fundamental types and primitives
//!
//! This crate defines the core types shared by every layer of the hadro
//! front-end:
//! - Particle identifiers (PDG numbering) and charge lookup
//! - Status codes and the final-state convention
//! - Collision kinematics (projectile, target, center-of-mass energy)
//! - Cross-section data
//! - Error taxonomy

pub mod error;
pub mod kinematics;
pub mod pdg;
pub mod status;
pub mod xsection;

pub use error::*;
pub use kinematics::*;
pub use pdg::*;
pub use xsection::*;
