//! Error types for the hadro front-end

use thiserror::Error;

use crate::PdgId;

/// Core hadro errors
#[derive(Error, Debug)]
pub enum HadroError {
    // Kinematics errors
    #[error("Unsupported kinematics: projectile {projectile} on target {target} at {ecm} GeV")]
    InvalidKinematics {
        projectile: PdgId,
        target: PdgId,
        ecm: f64,
    },

    // Session lifecycle errors
    #[error("Session already initialized; engines cannot be re-initialized in-process")]
    AlreadyInitialized,

    #[error("Engine family '{0}' is already active in this process")]
    SessionBusy(&'static str),

    #[error("Operation '{op}' is not valid in session state '{state}'")]
    InvalidState {
        op: &'static str,
        state: &'static str,
    },

    #[error("Session has failed and must be discarded")]
    SessionFailed,

    // Event record errors
    #[error("Lineage indices do not address a filtered view; query them before filtering")]
    StaleLineage,

    #[error("Engine family reports no daughter information")]
    LineageUnavailable,

    // Backend errors
    #[error("Backend initialization failed: {0}")]
    BackendInit(String),

    #[error("Backend runtime failure: {0}")]
    BackendRuntime(String),
}

/// Result type for hadro operations
pub type HadroResult<T> = Result<T, HadroError>;
