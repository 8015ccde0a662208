//! Event record
//!
//! One [`EventRecord`] is an immutable snapshot of one simulated collision.
//! The record copies the live prefix of the backend's arrays at construction,
//! so it stays valid after the session steps again; the engine's storage is
//! never aliased.
//!
//! Indexing convention: particle positions are 0-based and contiguous over
//! the current selection. Lineage pairs address the **unfiltered** stack,
//! 0-based, with [`NO_RELATION`] (`-1`) meaning "no such relation"; native
//! 1-based / 0-sentinel pairs are converted exactly once, here.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use hadro_core::{status, Charge, ChargeLookup, HadroError, HadroResult, PdgId};

use crate::RawStack;

/// Sentinel in a lineage pair: no mother/daughter at this slot
pub const NO_RELATION: i32 = -1;

/// Owned snapshot of one collision event
pub struct EventRecord {
    npart: usize,
    pid: Vec<PdgId>,
    status: Vec<i32>,
    px: Vec<f64>,
    py: Vec<f64>,
    pz: Vec<f64>,
    en: Vec<f64>,
    m: Vec<f64>,
    vx: Vec<f64>,
    vy: Vec<f64>,
    vz: Vec<f64>,
    vt: Vec<f64>,
    mothers: Vec<[i32; 2]>,
    daughters: Option<Vec<[i32; 2]>>,
    /// Active selection over the unfiltered stack; `None` = all particles
    selection: Option<Vec<usize>>,
    /// Sticky: set by the first `filter` call, never cleared
    filtered: bool,
    /// Charges for the full unfiltered stack, computed on first access
    charges: OnceCell<Vec<Charge>>,
    lookup: Arc<dyn ChargeLookup + Send + Sync>,
    impact_parameter: Option<f64>,
    n_wounded: Option<(u32, u32)>,
}

/// Read-only view of one particle row, as seen by filter predicates
#[derive(Clone, Copy)]
pub struct Particle<'a> {
    record: &'a EventRecord,
    index: usize,
}

impl<'a> Particle<'a> {
    #[inline]
    pub fn pid(&self) -> PdgId {
        self.record.pid[self.index]
    }

    #[inline]
    pub fn status(&self) -> i32 {
        self.record.status[self.index]
    }

    #[inline]
    pub fn is_final_state(&self) -> bool {
        self.status() == status::FINAL_STATE
    }

    /// Charge from the record's lazily computed table
    pub fn charge(&self) -> Charge {
        self.record.full_charges()[self.index]
    }

    #[inline]
    pub fn px(&self) -> f64 {
        self.record.px[self.index]
    }

    #[inline]
    pub fn py(&self) -> f64 {
        self.record.py[self.index]
    }

    #[inline]
    pub fn pz(&self) -> f64 {
        self.record.pz[self.index]
    }

    #[inline]
    pub fn en(&self) -> f64 {
        self.record.en[self.index]
    }

    #[inline]
    pub fn m(&self) -> f64 {
        self.record.m[self.index]
    }

    /// Transverse momentum
    pub fn pt(&self) -> f64 {
        self.px().hypot(self.py())
    }
}

/// Convert one native 1-based / 0-sentinel lineage index
#[inline]
fn to_zero_based(native: i32) -> i32 {
    if native <= 0 {
        NO_RELATION
    } else {
        native - 1
    }
}

impl EventRecord {
    /// Snapshot the live prefix of a backend's stack.
    ///
    /// Copies out `stack.npart` entries of every array and converts lineage
    /// pairs to the public convention. The `lookup` collaborator is kept for
    /// lazy charge derivation; the cache starts empty on every new record.
    pub fn snapshot(
        stack: &RawStack<'_>,
        lookup: Arc<dyn ChargeLookup + Send + Sync>,
    ) -> HadroResult<Self> {
        stack.validate()?;
        let n = stack.npart;

        Ok(EventRecord {
            npart: n,
            pid: stack.pid[..n].iter().map(|&c| PdgId(c)).collect(),
            status: stack.status[..n].to_vec(),
            px: stack.px[..n].to_vec(),
            py: stack.py[..n].to_vec(),
            pz: stack.pz[..n].to_vec(),
            en: stack.en[..n].to_vec(),
            m: stack.m[..n].to_vec(),
            vx: stack.vx[..n].to_vec(),
            vy: stack.vy[..n].to_vec(),
            vz: stack.vz[..n].to_vec(),
            vt: stack.vt[..n].to_vec(),
            mothers: stack.mothers[..n]
                .iter()
                .map(|p| [to_zero_based(p[0]), to_zero_based(p[1])])
                .collect(),
            daughters: stack.daughters.map(|d| {
                d[..n]
                    .iter()
                    .map(|p| [to_zero_based(p[0]), to_zero_based(p[1])])
                    .collect()
            }),
            selection: None,
            filtered: false,
            charges: OnceCell::new(),
            lookup,
            impact_parameter: None,
            n_wounded: None,
        })
    }

    /// Attach a backend-reported impact parameter
    pub fn with_impact_parameter(mut self, b: Option<f64>) -> Self {
        self.impact_parameter = b;
        self
    }

    /// Attach backend-reported wounded-nucleon counts
    pub fn with_n_wounded(mut self, nw: Option<(u32, u32)>) -> Self {
        self.n_wounded = nw;
        self
    }

    /// Particle count of the current selection
    pub fn len(&self) -> usize {
        match &self.selection {
            Some(sel) => sel.len(),
            None => self.npart,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Particle count of the full unfiltered stack
    pub fn unfiltered_len(&self) -> usize {
        self.npart
    }

    /// True once any `filter` call has been made, even an all-matching one
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Narrow the selection to particles satisfying `pred`.
    ///
    /// The predicate is always evaluated over the full unfiltered stack;
    /// each call replaces the previous selection rather than narrowing it
    /// further. Lineage queries are refused from here on.
    pub fn filter<F>(&mut self, pred: F)
    where
        F: Fn(Particle<'_>) -> bool,
    {
        let selected: Vec<usize> = {
            let this: &EventRecord = self;
            (0..this.npart)
                .filter(|&i| {
                    pred(Particle {
                        record: this,
                        index: i,
                    })
                })
                .collect()
        };
        self.selection = Some(selected);
        self.filtered = true;
    }

    /// Select final-state particles
    pub fn select_final_state(&mut self) {
        self.filter(|p| p.is_final_state());
    }

    /// Select final-state particles with known non-zero charge
    pub fn select_final_state_charged(&mut self) {
        self.filter(|p| p.is_final_state() && p.charge().is_known_nonzero());
    }

    fn full_charges(&self) -> &[Charge] {
        self.charges.get_or_init(|| {
            self.pid
                .iter()
                .map(|&pid| self.lookup.charge_of(pid))
                .collect()
        })
    }

    /// Charges over the current selection, derived lazily once per record
    pub fn charge(&self) -> Vec<Charge> {
        let full = self.full_charges();
        match &self.selection {
            Some(sel) => sel.iter().map(|&i| full[i]).collect(),
            None => full.to_vec(),
        }
    }

    /// Mother index pairs for the full unfiltered stack.
    ///
    /// Refused once any filter was applied: raw indices no longer correspond
    /// to positions in the visible sequence, and silently returning them
    /// would mislead the caller.
    pub fn mothers(&self) -> HadroResult<&[[i32; 2]]> {
        if self.filtered {
            return Err(HadroError::StaleLineage);
        }
        Ok(&self.mothers)
    }

    /// Daughter index pairs for the full unfiltered stack, if the engine
    /// family keeps child bookkeeping at all.
    pub fn daughters(&self) -> HadroResult<&[[i32; 2]]> {
        if self.filtered {
            return Err(HadroError::StaleLineage);
        }
        self.daughters
            .as_deref()
            .ok_or(HadroError::LineageUnavailable)
    }

    /// Iterate particle rows of the current selection
    pub fn particles(&self) -> impl Iterator<Item = Particle<'_>> {
        let indices: Vec<usize> = match &self.selection {
            Some(sel) => sel.clone(),
            None => (0..self.npart).collect(),
        };
        indices.into_iter().map(move |index| Particle {
            record: self,
            index,
        })
    }

    fn gather(&self, src: &[f64]) -> Vec<f64> {
        match &self.selection {
            Some(sel) => sel.iter().map(|&i| src[i]).collect(),
            None => src.to_vec(),
        }
    }

    pub fn pids(&self) -> Vec<PdgId> {
        match &self.selection {
            Some(sel) => sel.iter().map(|&i| self.pid[i]).collect(),
            None => self.pid.clone(),
        }
    }

    pub fn status(&self) -> Vec<i32> {
        match &self.selection {
            Some(sel) => sel.iter().map(|&i| self.status[i]).collect(),
            None => self.status.clone(),
        }
    }

    pub fn px(&self) -> Vec<f64> {
        self.gather(&self.px)
    }

    pub fn py(&self) -> Vec<f64> {
        self.gather(&self.py)
    }

    pub fn pz(&self) -> Vec<f64> {
        self.gather(&self.pz)
    }

    pub fn en(&self) -> Vec<f64> {
        self.gather(&self.en)
    }

    pub fn m(&self) -> Vec<f64> {
        self.gather(&self.m)
    }

    pub fn vx(&self) -> Vec<f64> {
        self.gather(&self.vx)
    }

    pub fn vy(&self) -> Vec<f64> {
        self.gather(&self.vy)
    }

    pub fn vz(&self) -> Vec<f64> {
        self.gather(&self.vz)
    }

    pub fn vt(&self) -> Vec<f64> {
        self.gather(&self.vt)
    }

    /// Transverse momenta over the current selection
    pub fn pt(&self) -> Vec<f64> {
        self.particles().map(|p| p.pt()).collect()
    }

    /// Pseudorapidities over the current selection
    pub fn eta(&self) -> Vec<f64> {
        self.particles()
            .map(|p| {
                let mom = (p.px() * p.px() + p.py() * p.py() + p.pz() * p.pz()).sqrt();
                0.5 * ((mom + p.pz()) / (mom - p.pz())).ln()
            })
            .collect()
    }

    /// Impact parameter as reported by the backend, if any
    pub fn impact_parameter(&self) -> Option<f64> {
        self.impact_parameter
    }

    /// Wounded-nucleon counts `(projectile side, target side)` as reported
    /// by the backend, if any. Families disagree on the semantics for
    /// hadron-hadron collisions; the number is surfaced as-is.
    pub fn n_wounded(&self) -> Option<(u32, u32)> {
        self.n_wounded
    }
}
