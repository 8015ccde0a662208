//! Process-wide engine-family guard
//!
//! Most native engines keep their working state in process-global storage,
//! so at most one session per family may be initialized in a process at a
//! time. The guard makes that constraint explicit: a second acquisition
//! fails with `SessionBusy` instead of silently corrupting engine state.
//! Running the same family twice concurrently requires separate OS
//! processes, which is a deployment concern outside this layer.

use parking_lot::Mutex;

use hadro_core::{HadroError, HadroResult};

static ACTIVE_FAMILIES: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

/// True while some session holds the guard for `family`
pub fn family_active(family: &str) -> bool {
    ACTIVE_FAMILIES.lock().iter().any(|&f| f == family)
}

/// Exclusive hold on one engine family for this process.
///
/// Released on drop; sessions hold it from successful initialization until
/// they are discarded.
#[derive(Debug)]
pub struct FamilyGuard {
    family: &'static str,
}

impl FamilyGuard {
    /// Acquire the guard, failing with `SessionBusy` if the family is
    /// already held.
    pub fn acquire(family: &'static str) -> HadroResult<Self> {
        let mut active = ACTIVE_FAMILIES.lock();
        if active.iter().any(|&f| f == family) {
            return Err(HadroError::SessionBusy(family));
        }
        active.push(family);
        tracing::debug!(family, "engine family acquired");
        Ok(FamilyGuard { family })
    }

    pub fn family(&self) -> &'static str {
        self.family
    }
}

impl Drop for FamilyGuard {
    fn drop(&mut self) {
        let mut active = ACTIVE_FAMILIES.lock();
        if let Some(pos) = active.iter().position(|&f| f == self.family) {
            active.remove(pos);
        }
        tracing::debug!(family = self.family, "engine family released");
    }
}
