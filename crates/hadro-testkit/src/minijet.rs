//! Minijet - a seeded toy minimum-bias generator
//!
//! Produces structurally realistic pp/meson-p events: beam documentation
//! entries, a color string descending from both beams, a beam remnant with
//! a single daughter, and a seeded multiplicity of final-state hadrons.
//! A decay afterburner closes out species flagged in the decay table and
//! appends their daughters in place, so flagged species never appear in the
//! final state.
//!
//! Storage mimics the native engines: fixed-capacity arrays longer than the
//! live particle count, overwritten in place on every event, with HEPEVT
//! 1-based / 0-sentinel lineage pairs.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hadro_core::{status, CrossSection, HadroError, HadroResult, Kinematics, PdgId};
use hadro_event::RawStack;
use hadro_session::Backend;

/// Engine family name used by the process-wide guard
pub const FAMILY: &str = "minijet";

/// Native stack capacity; live events use a fraction of it
const STACK_CAPACITY: usize = 512;

const SUPPORTED_PROJECTILES: &[i32] = &[2212, -2212, 2112, 211, -211, 321, -321, 130, 310];
const SUPPORTED_TARGETS: &[i32] = &[2212, 2112];

fn mass_of(pid: i32) -> f64 {
    match pid.abs() {
        22 => 0.0,
        211 => 0.139_570,
        111 => 0.134_977,
        321 => 0.493_677,
        130 | 310 | 311 => 0.497_611,
        2212 => 0.938_272,
        2112 => 0.939_565,
        92 => 0.0,
        9902210 => 1.2,
        _ => 0.5,
    }
}

/// Two-body channel used by the decay afterburner
fn channel_of(pid: i32) -> [i32; 2] {
    match pid.abs() {
        130 | 310 => [211, -211],
        // pi0, eta, and the radiative catch-all
        _ => [22, 22],
    }
}

/// Deterministic in-process reference engine
pub struct Minijet {
    kin: Option<Kinematics>,
    rng: Option<StdRng>,
    initialized: bool,
    /// Species flagged here are handed to the decay afterburner
    decay_table: HashMap<i32, bool>,
    fail_after: Option<u64>,
    events: u64,

    // Native per-event arrays, overwritten in place each event
    npart: usize,
    pid: Vec<i32>,
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
    daughters: Vec<[i32; 2]>,
    impact: Option<f64>,
}

impl Default for Minijet {
    fn default() -> Self {
        Self::new()
    }
}

impl Minijet {
    pub fn new() -> Self {
        Minijet {
            kin: None,
            rng: None,
            initialized: false,
            decay_table: HashMap::new(),
            fail_after: None,
            events: 0,
            npart: 0,
            pid: vec![0; STACK_CAPACITY],
            status: vec![0; STACK_CAPACITY],
            px: vec![0.0; STACK_CAPACITY],
            py: vec![0.0; STACK_CAPACITY],
            pz: vec![0.0; STACK_CAPACITY],
            en: vec![0.0; STACK_CAPACITY],
            m: vec![0.0; STACK_CAPACITY],
            vx: vec![0.0; STACK_CAPACITY],
            vy: vec![0.0; STACK_CAPACITY],
            vz: vec![0.0; STACK_CAPACITY],
            vt: vec![0.0; STACK_CAPACITY],
            mothers: vec![[0, 0]; STACK_CAPACITY],
            daughters: vec![[0, 0]; STACK_CAPACITY],
            impact: None,
        }
    }

    /// Inject a runtime failure after `after_events` successful events
    pub fn with_forced_failure(mut self, after_events: u64) -> Self {
        self.fail_after = Some(after_events);
        self
    }

    /// Append one particle; returns its 1-based native index
    fn push(&mut self, pid: i32, st: i32, mom: [f64; 3], vtx: [f64; 4], mothers: [i32; 2]) -> i32 {
        let i = self.npart;
        debug_assert!(i < STACK_CAPACITY, "minijet stack overflow");
        let m = mass_of(pid);
        self.pid[i] = pid;
        self.status[i] = st;
        self.px[i] = mom[0];
        self.py[i] = mom[1];
        self.pz[i] = mom[2];
        self.en[i] = (mom[0] * mom[0] + mom[1] * mom[1] + mom[2] * mom[2] + m * m).sqrt();
        self.m[i] = m;
        self.vx[i] = vtx[0];
        self.vy[i] = vtx[1];
        self.vz[i] = vtx[2];
        self.vt[i] = vtx[3];
        self.mothers[i] = mothers;
        self.daughters[i] = [0, 0];
        self.npart += 1;
        (i + 1) as i32
    }

    fn sample_species(rng: &mut StdRng) -> i32 {
        match rng.gen_range(0..100u32) {
            0..=24 => 211,
            25..=49 => -211,
            50..=61 => 111,
            62..=69 => 321,
            70..=77 => -321,
            78..=83 => 130,
            84..=88 => 310,
            89..=92 => 2212,
            93..=96 => 2112,
            _ => 9902210,
        }
    }

    fn sample_pt(rng: &mut StdRng) -> (f64, f64) {
        // Box-Muller with a soft 350 MeV scale
        let u1: f64 = rng.gen_range(1e-9..1.0f64);
        let u2: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let r = 0.35 * (-2.0 * u1.ln()).sqrt();
        (r * u2.cos(), r * u2.sin())
    }
}

impl Backend for Minijet {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn configure(&mut self, kin: &Kinematics) -> HadroResult<()> {
        let supported = SUPPORTED_PROJECTILES.contains(&kin.projectile.code())
            && SUPPORTED_TARGETS.contains(&kin.target.code())
            && kin.ecm >= 3.0
            && kin.ecm <= 1.0e6;
        if !supported {
            return Err(HadroError::InvalidKinematics {
                projectile: kin.projectile,
                target: kin.target,
                ecm: kin.ecm,
            });
        }
        self.kin = Some(*kin);
        Ok(())
    }

    fn initialize(&mut self, seed: u64) -> HadroResult<()> {
        if self.initialized {
            return Err(HadroError::AlreadyInitialized);
        }
        if self.kin.is_none() {
            return Err(HadroError::BackendInit(
                "initialize called before kinematics were configured".into(),
            ));
        }
        self.rng = Some(StdRng::seed_from_u64(seed));
        self.initialized = true;
        Ok(())
    }

    fn set_stable(&mut self, pid: PdgId, stable: bool) -> HadroResult<()> {
        // K0 has no decay-table slot of its own; the mass eigenstates do.
        if pid.code().abs() == 311 {
            tracing::info!("decay-table edit for K0 remapped to K0L and K0S");
            self.set_stable(PdgId(130), stable)?;
            return self.set_stable(PdgId(310), stable);
        }
        self.decay_table.insert(pid.code(), stable);
        Ok(())
    }

    fn advance_event(&mut self) -> HadroResult<()> {
        if !self.initialized {
            return Err(HadroError::BackendRuntime(
                "event requested before initialization".into(),
            ));
        }
        if let Some(limit) = self.fail_after {
            if self.events >= limit {
                return Err(HadroError::BackendRuntime(
                    "injected failure limit reached".into(),
                ));
            }
        }
        let kin = self.kin.ok_or_else(|| {
            HadroError::BackendRuntime("event requested without kinematics".into())
        })?;
        let mut rng = self
            .rng
            .take()
            .ok_or_else(|| HadroError::BackendRuntime("random stream missing".into()))?;

        self.events += 1;
        self.npart = 0;
        let origin = [0.0; 4];
        let half = kin.ecm / 2.0;

        // Beams: documentation entries with no mothers
        let p1 = kin.projectile.code();
        let p2 = kin.target.code();
        let pz1 = (half * half - mass_of(p1) * mass_of(p1)).max(0.0).sqrt();
        let pz2 = (half * half - mass_of(p2) * mass_of(p2)).max(0.0).sqrt();
        let b1 = self.push(p1, status::DOCUMENTATION, [0.0, 0.0, pz1], origin, [0, 0]);
        let b2 = self.push(p2, status::DOCUMENTATION, [0.0, 0.0, -pz2], origin, [0, 0]);

        // Color string descending from both beams
        let string = self.push(
            92,
            status::DECAYED,
            [0.0, 0.0, rng.gen_range(-1.0..1.0)],
            origin,
            [b1, b2],
        );

        // Beam remnant with a single daughter (elastic re-emission)
        let remnant = self.push(
            p1,
            status::DECAYED,
            [0.0, 0.0, 0.6 * half],
            origin,
            [b1, 0],
        );
        let (kx, ky) = Self::sample_pt(&mut rng);
        let leading = self.push(
            p1,
            status::FINAL_STATE,
            [kx, ky, 0.55 * half],
            origin,
            [remnant, 0],
        );
        self.daughters[(remnant - 1) as usize] = [leading, 0];

        // String fragmentation: guaranteed pi0 pair and one generator-
        // internal remnant, then a seeded multiplicity of common hadrons
        let first_hadron = self.npart as i32 + 1;
        let mut species = vec![111, 111, 9902210];
        let n = (2.0 * kin.ecm.ln()) as usize + rng.gen_range(2..=6);
        for _ in 0..n {
            species.push(Self::sample_species(&mut rng));
        }
        for pid in species {
            let (sx, sy) = Self::sample_pt(&mut rng);
            let sz = rng.gen_range(-0.25..0.25) * kin.ecm;
            self.push(pid, status::FINAL_STATE, [sx, sy, sz], origin, [string, 0]);
        }
        let last_hadron = self.npart as i32;
        self.daughters[(string - 1) as usize] = [first_hadron, last_hadron];

        // Decay afterburner: close out flagged species, append daughters.
        // The scan bound tracks npart so appended daughters are checked
        // against the decay table themselves; every channel bottoms out in
        // pions or photons, so the chain terminates.
        let mut i = 0;
        while i < self.npart {
            let pid = self.pid[i];
            if self.status[i] != status::FINAL_STATE
                || !self.decay_table.get(&pid).copied().unwrap_or(false)
            {
                i += 1;
                continue;
            }
            if self.npart + 2 > STACK_CAPACITY {
                break;
            }
            let [d1, d2] = channel_of(pid);
            let parent = (i + 1) as i32;
            let vtx = [
                self.vx[i] + rng.gen_range(-0.5..0.5),
                self.vy[i] + rng.gen_range(-0.5..0.5),
                self.vz[i] + rng.gen_range(-0.5..0.5),
                rng.gen_range(0.1..5.0),
            ];
            let share = [self.px[i] / 2.0, self.py[i] / 2.0, self.pz[i] / 2.0];
            let j1 = self.push(d1, status::FINAL_STATE, share, vtx, [parent, 0]);
            let j2 = self.push(d2, status::FINAL_STATE, share, vtx, [parent, 0]);
            self.status[i] = status::DECAYED;
            self.daughters[i] = [j1, j2];
            i += 1;
        }

        self.impact = Some(rng.gen_range(0.05..2.5));
        self.rng = Some(rng);
        Ok(())
    }

    fn raw_stack(&self) -> RawStack<'_> {
        RawStack {
            npart: self.npart,
            pid: &self.pid,
            status: &self.status,
            px: &self.px,
            py: &self.py,
            pz: &self.pz,
            en: &self.en,
            m: &self.m,
            vx: &self.vx,
            vy: &self.vy,
            vz: &self.vz,
            vt: &self.vt,
            mothers: &self.mothers,
            daughters: Some(&self.daughters),
        }
    }

    fn cross_section(&self) -> HadroResult<CrossSection> {
        let kin = self.kin.ok_or_else(|| {
            HadroError::BackendRuntime("cross section requested before configuration".into())
        })?;
        let meson = matches!(kin.projectile.code().abs(), 211 | 321 | 130 | 310);
        let hadron_factor = if meson { 0.62 } else { 1.0 };
        // Mild log^2(s) rise anchored at the 10 GeV pp reference point
        let rise = 1.0 + 0.028 * (kin.ecm / 10.0).ln().powi(2);
        let scale = hadron_factor * rise;
        Ok(CrossSection {
            total: 38.2 * scale,
            elastic: 7.4 * scale,
            inelastic: 30.7 * scale,
            diffractive_xb: 1.6 * scale,
            diffractive_ax: 1.6 * scale,
            diffractive_xx: 9.9 * scale,
            diffractive_axb: 0.0,
            non_diffractive: f64::NAN,
        }
        .with_derived_non_diffractive())
    }

    fn sigma_inel(&self) -> HadroResult<f64> {
        Ok(self.cross_section()?.inelastic)
    }

    fn impact_parameter(&self) -> Option<f64> {
        self.impact
    }

    fn n_wounded(&self) -> Option<(u32, u32)> {
        // Reported per family convention: one participant each side for
        // hadron-hadron events, surfaced as-is.
        Some((1, 1))
    }
}
