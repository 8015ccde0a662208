//! Backend adapter contract
//!
//! One implementation exists per engine family and is the only code aware
//! of that engine's native call surface. The session drives an adapter
//! exclusively through this trait; the adapter owns the per-event storage
//! and overwrites it in place on every [`Backend::advance_event`].

use hadro_core::{CrossSection, HadroResult, Kinematics, PdgId};
use hadro_event::RawStack;

/// Control-and-stack contract the session requires from an engine family
pub trait Backend: Send {
    /// Engine family name, used as the key of the process-wide guard.
    ///
    /// Engines built around process-global internal state must return one
    /// fixed name per family so two sessions cannot run it concurrently.
    fn family(&self) -> &'static str;

    /// Apply a projectile/target/energy combination.
    ///
    /// Called before initialization and again between runs when the caller
    /// changes beam energy. Combinations outside what the engine supports
    /// fail with `InvalidKinematics`.
    fn configure(&mut self, kin: &Kinematics) -> HadroResult<()>;

    /// One-time engine setup: random seed, tunes, internal tables.
    ///
    /// Native engines cannot be re-initialized in-process; a second call
    /// fails with `AlreadyInitialized`.
    fn initialize(&mut self, seed: u64) -> HadroResult<()>;

    /// Edit the decay table for one species; persists until toggled again.
    fn set_stable(&mut self, pid: PdgId, stable: bool) -> HadroResult<()>;

    /// Advance the engine by exactly one collision event, overwriting the
    /// internal per-event storage in place.
    fn advance_event(&mut self) -> HadroResult<()>;

    /// Borrow the current per-event stack.
    ///
    /// The view aliases engine storage and is consumed (snapshotted) before
    /// the next mutable call on the adapter; the borrow checker enforces
    /// exactly that.
    fn raw_stack(&self) -> RawStack<'_>;

    /// Full cross-section breakdown for the configured kinematics
    fn cross_section(&self) -> HadroResult<CrossSection>;

    /// Inelastic cross section for the configured kinematics, in mb
    fn sigma_inel(&self) -> HadroResult<f64>;

    /// Impact parameter of the current event, if the family reports one
    fn impact_parameter(&self) -> Option<f64> {
        None
    }

    /// Wounded-nucleon counts of the current event, if the family reports
    /// them. Surfaced as-is; families disagree on hadron-hadron semantics.
    fn n_wounded(&self) -> Option<(u32, u32)> {
        None
    }
}
