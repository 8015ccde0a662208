//! Generator session state machine
//!
//! A session owns exactly one backend adapter and sequences its lifecycle:
//! configure → initialize → repeated stepping, with cross-section queries
//! and decay-table edits once initialized. Every operation is a blocking
//! synchronous call; `&mut self` makes same-session steps sequential by
//! construction, and the family guard keeps non-reentrant engines exclusive
//! across sessions.

use std::sync::Arc;

use rand::Rng;

use hadro_core::{
    ChargeLookup, CrossSection, HadroError, HadroResult, Kinematics, PdgDatabase, PdgId,
};
use hadro_event::EventRecord;

use crate::{family_active, Backend, FamilyGuard};

/// Lifecycle state of a generator session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No kinematics applied yet
    Unconfigured,
    /// Kinematics applied, engine not yet initialized
    Configured,
    /// Initialized; accepts stepping, queries, and decay-table edits
    Ready,
    /// Unrecoverable backend error; the session must be discarded
    Failed,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Unconfigured => "unconfigured",
            SessionState::Configured => "configured",
            SessionState::Ready => "ready",
            SessionState::Failed => "failed",
        }
    }
}

/// One generator run over one backend adapter
pub struct GeneratorSession<B: Backend> {
    backend: B,
    state: SessionState,
    kinematics: Option<Kinematics>,
    lookup: Arc<dyn ChargeLookup + Send + Sync>,
    guard: Option<FamilyGuard>,
}

impl<B: Backend> GeneratorSession<B> {
    /// Session over `backend` with the built-in particle-property table
    pub fn new(backend: B) -> Self {
        Self::with_lookup(backend, Arc::new(PdgDatabase::new()))
    }

    /// Session with a caller-supplied particle-property collaborator
    pub fn with_lookup(backend: B, lookup: Arc<dyn ChargeLookup + Send + Sync>) -> Self {
        GeneratorSession {
            backend,
            state: SessionState::Unconfigured,
            kinematics: None,
            lookup,
            guard: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Currently configured kinematics
    pub fn kinematics(&self) -> Option<&Kinematics> {
        self.kinematics.as_ref()
    }

    fn require_ready(&self, op: &'static str) -> HadroResult<()> {
        match self.state {
            SessionState::Ready => Ok(()),
            SessionState::Failed => Err(HadroError::SessionFailed),
            other => Err(HadroError::InvalidState {
                op,
                state: other.as_str(),
            }),
        }
    }

    /// Apply a projectile/target/energy combination.
    ///
    /// Re-entrant: may be called again before initialization, and again
    /// while `Ready` to change beam energy between batches. Refused while
    /// another session holds this engine family.
    pub fn configure(&mut self, kin: Kinematics) -> HadroResult<()> {
        if self.state == SessionState::Failed {
            return Err(HadroError::SessionFailed);
        }
        if self.guard.is_none() && family_active(self.backend.family()) {
            return Err(HadroError::SessionBusy(self.backend.family()));
        }

        self.backend.configure(&kin)?;
        self.kinematics = Some(kin);
        if self.state == SessionState::Unconfigured {
            self.state = SessionState::Configured;
        }
        tracing::debug!(
            projectile = %kin.projectile,
            target = %kin.target,
            ecm = kin.ecm,
            "kinematics configured"
        );
        Ok(())
    }

    /// One-time engine initialization with the configured kinematics.
    ///
    /// Returns the seed actually used: the caller's verbatim, or one drawn
    /// from the thread RNG and logged so a run can be replayed. A second
    /// call fails with `AlreadyInitialized`; the engines cannot be safely
    /// re-initialized in-process.
    pub fn initialize(&mut self, seed: Option<u64>) -> HadroResult<u64> {
        match self.state {
            SessionState::Failed => return Err(HadroError::SessionFailed),
            SessionState::Ready => return Err(HadroError::AlreadyInitialized),
            SessionState::Unconfigured => {
                return Err(HadroError::InvalidState {
                    op: "initialize",
                    state: self.state.as_str(),
                })
            }
            SessionState::Configured => {}
        }

        let guard = FamilyGuard::acquire(self.backend.family())?;
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        tracing::info!(family = self.backend.family(), seed, "initializing engine");

        if let Err(e) = self.backend.initialize(seed) {
            // The engine's global state is suspect; keep the guard until the
            // session is discarded.
            self.guard = Some(guard);
            self.state = SessionState::Failed;
            return Err(e);
        }

        self.guard = Some(guard);
        self.state = SessionState::Ready;
        Ok(seed)
    }

    /// Edit the decay table for one species.
    ///
    /// The effect is global for the rest of the session until toggled again.
    pub fn set_stable(&mut self, pid: PdgId, stable: bool) -> HadroResult<()> {
        self.require_ready("set_stable")?;
        self.backend.set_stable(pid, stable)
    }

    /// Advance the backend by exactly one collision event.
    ///
    /// Returns an owned snapshot record; stepping again does not invalidate
    /// records already returned. A backend failure moves the session to
    /// `Failed`.
    pub fn step(&mut self) -> HadroResult<EventRecord> {
        self.require_ready("step")?;

        if let Err(e) = self.backend.advance_event() {
            tracing::warn!(family = self.backend.family(), error = %e, "event generation failed");
            self.state = SessionState::Failed;
            return Err(e);
        }

        let snapshot = {
            let stack = self.backend.raw_stack();
            EventRecord::snapshot(&stack, Arc::clone(&self.lookup))
        };
        let record = match snapshot {
            Ok(r) => r,
            Err(e) => {
                self.state = SessionState::Failed;
                return Err(e);
            }
        };

        Ok(record
            .with_impact_parameter(self.backend.impact_parameter())
            .with_n_wounded(self.backend.n_wounded()))
    }

    /// Cross-section breakdown for the configured kinematics.
    ///
    /// Does not consume an event and needs no prior `step`.
    pub fn cross_section(&self) -> HadroResult<CrossSection> {
        self.require_ready("cross_section")?;
        self.backend.cross_section()
    }

    /// Inelastic cross section for the configured kinematics, in mb
    pub fn sigma_inel(&self) -> HadroResult<f64> {
        self.require_ready("sigma_inel")?;
        self.backend.sigma_inel()
    }
}

#[cfg(test)]
mod tests {
    use hadro_core::pdg::pid;
    use hadro_event::RawStack;

    use super::*;

    /// Minimal in-memory backend for state-machine tests
    struct StubBackend {
        family: &'static str,
        initialized: bool,
        fail_init: bool,
        pid: Vec<i32>,
        status: Vec<i32>,
        f: Vec<f64>,
        pairs: Vec<[i32; 2]>,
    }

    impl StubBackend {
        fn new(family: &'static str) -> Self {
            StubBackend {
                family,
                initialized: false,
                fail_init: false,
                pid: vec![2212, 211],
                status: vec![3, 1],
                f: vec![1.0, 1.0],
                pairs: vec![[0, 0], [1, 0]],
            }
        }
    }

    impl Backend for StubBackend {
        fn family(&self) -> &'static str {
            self.family
        }

        fn configure(&mut self, kin: &Kinematics) -> HadroResult<()> {
            if kin.ecm <= 0.0 {
                return Err(HadroError::InvalidKinematics {
                    projectile: kin.projectile,
                    target: kin.target,
                    ecm: kin.ecm,
                });
            }
            Ok(())
        }

        fn initialize(&mut self, _seed: u64) -> HadroResult<()> {
            if self.fail_init {
                return Err(HadroError::BackendInit("table load failed".into()));
            }
            if self.initialized {
                return Err(HadroError::AlreadyInitialized);
            }
            self.initialized = true;
            Ok(())
        }

        fn set_stable(&mut self, _pid: PdgId, _stable: bool) -> HadroResult<()> {
            Ok(())
        }

        fn advance_event(&mut self) -> HadroResult<()> {
            Ok(())
        }

        fn raw_stack(&self) -> RawStack<'_> {
            RawStack {
                npart: 2,
                pid: &self.pid,
                status: &self.status,
                px: &self.f,
                py: &self.f,
                pz: &self.f,
                en: &self.f,
                m: &self.f,
                vx: &self.f,
                vy: &self.f,
                vz: &self.f,
                vt: &self.f,
                mothers: &self.pairs,
                daughters: None,
            }
        }

        fn cross_section(&self) -> HadroResult<CrossSection> {
            Ok(CrossSection::default())
        }

        fn sigma_inel(&self) -> HadroResult<f64> {
            Ok(30.7)
        }
    }

    fn pp() -> Kinematics {
        Kinematics::center_of_mass(10.0, pid::PROTON, pid::PROTON)
    }

    #[test]
    fn test_step_before_initialize_is_a_lifecycle_error() {
        let mut s = GeneratorSession::new(StubBackend::new("stub-lifecycle"));
        assert!(matches!(
            s.step(),
            Err(HadroError::InvalidState {
                op: "step",
                state: "unconfigured"
            })
        ));
        s.configure(pp()).unwrap();
        assert!(matches!(
            s.step(),
            Err(HadroError::InvalidState {
                op: "step",
                state: "configured"
            })
        ));
    }

    #[test]
    fn test_initialize_requires_configuration() {
        let mut s = GeneratorSession::new(StubBackend::new("stub-init-order"));
        assert!(matches!(
            s.initialize(Some(1)),
            Err(HadroError::InvalidState {
                op: "initialize",
                ..
            })
        ));
    }

    #[test]
    fn test_set_stable_requires_initialization() {
        let mut s = GeneratorSession::new(StubBackend::new("stub-stable-order"));
        s.configure(pp()).unwrap();
        assert!(matches!(
            s.set_stable(pid::PI_ZERO, true),
            Err(HadroError::InvalidState {
                op: "set_stable",
                ..
            })
        ));
    }

    #[test]
    fn test_double_initialize_is_refused() {
        let mut s = GeneratorSession::new(StubBackend::new("stub-double-init"));
        s.configure(pp()).unwrap();
        assert_eq!(s.initialize(Some(7)).unwrap(), 7);
        assert!(matches!(
            s.initialize(Some(7)),
            Err(HadroError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_drawn_seed_is_returned() {
        let mut s = GeneratorSession::new(StubBackend::new("stub-seed"));
        s.configure(pp()).unwrap();
        let _seed = s.initialize(None).unwrap();
        assert_eq!(s.state(), SessionState::Ready);
    }

    #[test]
    fn test_reconfigure_while_ready_is_supported() {
        let mut s = GeneratorSession::new(StubBackend::new("stub-reconf"));
        s.configure(pp()).unwrap();
        s.initialize(Some(1)).unwrap();
        s.configure(Kinematics::center_of_mass(100.0, pid::PROTON, pid::PROTON))
            .unwrap();
        assert_eq!(s.state(), SessionState::Ready);
        assert_eq!(s.kinematics().unwrap().ecm, 100.0);
        assert!(s.step().is_ok());
    }

    #[test]
    fn test_invalid_kinematics_does_not_poison_session() {
        let mut s = GeneratorSession::new(StubBackend::new("stub-badkin"));
        assert!(matches!(
            s.configure(Kinematics::center_of_mass(-1.0, pid::PROTON, pid::PROTON)),
            Err(HadroError::InvalidKinematics { .. })
        ));
        assert_eq!(s.state(), SessionState::Unconfigured);
        s.configure(pp()).unwrap();
        assert_eq!(s.state(), SessionState::Configured);
    }

    #[test]
    fn test_backend_init_failure_moves_to_failed() {
        let mut backend = StubBackend::new("stub-initfail");
        backend.fail_init = true;
        let mut s = GeneratorSession::new(backend);
        s.configure(pp()).unwrap();
        assert!(matches!(
            s.initialize(Some(1)),
            Err(HadroError::BackendInit(_))
        ));
        assert_eq!(s.state(), SessionState::Failed);
        assert!(matches!(s.step(), Err(HadroError::SessionFailed)));
        assert!(matches!(s.configure(pp()), Err(HadroError::SessionFailed)));
    }

    #[test]
    fn test_second_session_of_family_is_busy() {
        let mut a = GeneratorSession::new(StubBackend::new("stub-exclusive"));
        a.configure(pp()).unwrap();
        a.initialize(Some(1)).unwrap();

        let mut b = GeneratorSession::new(StubBackend::new("stub-exclusive"));
        assert!(matches!(
            b.configure(pp()),
            Err(HadroError::SessionBusy("stub-exclusive"))
        ));

        drop(a);
        b.configure(pp()).unwrap();
        b.initialize(Some(1)).unwrap();
        assert!(b.step().is_ok());
    }

    #[test]
    fn test_cross_section_needs_no_step() {
        let mut s = GeneratorSession::new(StubBackend::new("stub-xsec"));
        s.configure(pp()).unwrap();
        s.initialize(Some(1)).unwrap();
        assert!(s.cross_section().is_ok());
        assert_eq!(s.sigma_inel().unwrap(), 30.7);
    }
}
