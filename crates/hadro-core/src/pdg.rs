//! PDG particle identifiers and charge lookup
//!
//! Particle species are identified by their PDG Monte Carlo numbering code.
//! The built-in [`PdgDatabase`] covers the species common hadronic event
//! generators actually emit; everything else (generator-internal ids,
//! exotic remnants) reports [`Charge::Unknown`].

use std::fmt;

/// PDG Monte Carlo particle-numbering code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PdgId(pub i32);

impl PdgId {
    /// Absolute id (particle and antiparticle share one species entry)
    #[inline]
    pub fn abs(self) -> PdgId {
        PdgId(self.0.abs())
    }

    /// The charge-conjugate id
    #[inline]
    pub fn anti(self) -> PdgId {
        PdgId(-self.0)
    }

    /// Raw integer code
    #[inline]
    pub fn code(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PdgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for PdgId {
    fn from(code: i32) -> Self {
        PdgId(code)
    }
}

/// Common species ids
pub mod pid {
    use super::PdgId;

    pub const ELECTRON: PdgId = PdgId(11);
    pub const MUON: PdgId = PdgId(13);
    pub const PHOTON: PdgId = PdgId(22);
    pub const PI_ZERO: PdgId = PdgId(111);
    pub const PI_PLUS: PdgId = PdgId(211);
    pub const PI_MINUS: PdgId = PdgId(-211);
    pub const K_LONG: PdgId = PdgId(130);
    pub const K_SHORT: PdgId = PdgId(310);
    pub const K_ZERO: PdgId = PdgId(311);
    pub const K_PLUS: PdgId = PdgId(321);
    pub const K_MINUS: PdgId = PdgId(-321);
    pub const PROTON: PdgId = PdgId(2212);
    pub const NEUTRON: PdgId = PdgId(2112);
    pub const LAMBDA: PdgId = PdgId(3122);
}

/// Electric charge in exact thirds of the elementary charge
///
/// Generators emit internal particles the property tables know nothing
/// about, so "unknown" is a first-class value rather than a panic or a NaN.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charge {
    /// Charge as a count of e/3
    Thirds(i32),
    /// Species not covered by the property table
    Unknown,
}

impl Charge {
    /// Charge in units of the elementary charge, if known
    pub fn in_units(self) -> Option<f64> {
        match self {
            Charge::Thirds(t) => Some(f64::from(t) / 3.0),
            Charge::Unknown => None,
        }
    }

    /// True when the charge is known and non-zero
    pub fn is_known_nonzero(self) -> bool {
        matches!(self, Charge::Thirds(t) if t != 0)
    }
}

/// Particle-property lookup collaborator
pub trait ChargeLookup {
    /// Electric charge of a species, in thirds of the elementary charge
    fn charge_of(&self, pid: PdgId) -> Charge;
}

/// Built-in property table
///
/// Covers leptons, the photon, and the light and charmed hadrons the
/// supported engine families produce. Antiparticles mirror their particle
/// entry with the sign flipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdgDatabase;

impl PdgDatabase {
    pub fn new() -> Self {
        PdgDatabase
    }

    fn thirds_of(code: i32) -> Option<i32> {
        let thirds = match code {
            // leptons
            11 | 13 | 15 => -3,
            12 | 14 | 16 => 0,
            // gauge bosons
            21 | 22 | 23 => 0,
            24 => 3,
            // light mesons
            111 | 113 | 130 | 221 | 223 | 310 | 311 | 331 | 333 => 0,
            211 | 213 => 3,
            // strange and charmed mesons
            321 | 323 | 411 | 413 | 431 => 3,
            313 | 421 | 423 | 441 | 443 => 0,
            // light baryons
            2212 | 2214 => 3,
            2112 | 2114 => 0,
            2224 => 6,
            1114 => -3,
            // strange baryons
            3122 | 3212 | 3214 | 3322 | 3324 => 0,
            3222 | 3224 => 3,
            3112 | 3114 | 3312 | 3314 | 3334 => -3,
            // charmed baryons
            4122 | 4212 | 4214 | 4222 | 4224 | 4232 => 3,
            4112 | 4114 | 4132 | 4314 | 4324 | 4332 => 0,
            _ => return None,
        };
        Some(thirds)
    }
}

impl ChargeLookup for PdgDatabase {
    fn charge_of(&self, pid: PdgId) -> Charge {
        match Self::thirds_of(pid.0.abs()) {
            Some(t) if pid.0 < 0 => Charge::Thirds(-t),
            Some(t) => Charge::Thirds(t),
            None => Charge::Unknown,
        }
    }
}
