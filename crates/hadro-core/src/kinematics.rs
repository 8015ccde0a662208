//! Collision kinematics
//!
//! A kinematics setup names the projectile species, the target species, and
//! the collision energy. Everything downstream (initialization, event
//! stepping, cross-section queries) refers to the session's current setup.

use crate::PdgId;

/// Reference frame of the reported event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Frame {
    /// Center-of-mass frame (every supported family reports in this frame)
    #[default]
    CenterOfMass,
    /// Fixed-target frame
    FixedTarget,
}

/// Kinematics of one projectile-target-energy combination
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    /// Projectile species
    pub projectile: PdgId,
    /// Target species
    pub target: PdgId,
    /// Center-of-mass energy in GeV
    pub ecm: f64,
    /// Frame the engine reports particles in
    pub frame: Frame,
}

impl Kinematics {
    /// Center-of-mass collision at `ecm` GeV
    pub fn center_of_mass(ecm: f64, projectile: impl Into<PdgId>, target: impl Into<PdgId>) -> Self {
        Kinematics {
            projectile: projectile.into(),
            target: target.into(),
            ecm,
            frame: Frame::CenterOfMass,
        }
    }
}
