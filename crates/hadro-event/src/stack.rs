//! Raw particle stack view
//!
//! Engines keep the current event in a block of native arrays that is
//! overwritten in place on every step. [`RawStack`] borrows that block and
//! renames it into the common schema. The borrow ties the view to the
//! backend: it cannot outlive the next mutable call on the engine.
//!
//! Native conventions tolerated here:
//! - arrays longer than the live particle count (trailing unused slots);
//!   only the first `npart` entries are meaningful
//! - HEPEVT-style lineage: 1-based index pairs with `0` meaning "no such
//!   relation"
//! - families without daughter bookkeeping (`daughters == None`)

use hadro_core::{HadroError, HadroResult};

/// Borrowed view of one backend's current per-event arrays
#[derive(Clone, Copy, Debug)]
pub struct RawStack<'a> {
    /// Live particle count; slices below may be longer than this
    pub npart: usize,
    /// PDG codes
    pub pid: &'a [i32],
    /// Native status codes, already mapped to the HEPEVT convention
    pub status: &'a [i32],
    pub px: &'a [f64],
    pub py: &'a [f64],
    pub pz: &'a [f64],
    pub en: &'a [f64],
    pub m: &'a [f64],
    pub vx: &'a [f64],
    pub vy: &'a [f64],
    pub vz: &'a [f64],
    pub vt: &'a [f64],
    /// Mother index pairs, 1-based, 0 = no mother
    pub mothers: &'a [[i32; 2]],
    /// Daughter index pairs; `None` for families without child bookkeeping
    pub daughters: Option<&'a [[i32; 2]]>,
}

impl<'a> RawStack<'a> {
    /// Check that every array covers the live particle count.
    ///
    /// A short array is a broken adapter, reported as a backend failure.
    pub fn validate(&self) -> HadroResult<()> {
        let lens = [
            ("pid", self.pid.len()),
            ("status", self.status.len()),
            ("px", self.px.len()),
            ("py", self.py.len()),
            ("pz", self.pz.len()),
            ("en", self.en.len()),
            ("m", self.m.len()),
            ("vx", self.vx.len()),
            ("vy", self.vy.len()),
            ("vz", self.vz.len()),
            ("vt", self.vt.len()),
            ("mothers", self.mothers.len()),
        ];
        for (name, len) in lens {
            if len < self.npart {
                return Err(HadroError::BackendRuntime(format!(
                    "stack array '{name}' has {len} slots for {} particles",
                    self.npart
                )));
            }
        }
        if let Some(d) = self.daughters {
            if d.len() < self.npart {
                return Err(HadroError::BackendRuntime(format!(
                    "stack array 'daughters' has {} slots for {} particles",
                    d.len(),
                    self.npart
                )));
            }
        }
        Ok(())
    }
}
