use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// PruneCounters
/// Ephemeral, in-memory counters for compiled conditions and granule checks.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PruneCounters {
    // Compilation
    pub conditions_compiled: u64,
    pub rpn_elements: u64,
    pub clauses_dropped: u64,

    // Granule checks
    pub granules_checked: u64,
    pub granules_pruned: u64,
    pub rectangles_evaluated: u64,
    pub eval_errors: u64,
}

///
/// EventReport
/// Point-in-time snapshot of the counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub counters: PruneCounters,
}

impl EventReport {
    /// Fraction of checked granules that were pruned, if any were checked.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn prune_ratio(&self) -> Option<f64> {
        let checked = self.counters.granules_checked;
        (checked > 0).then(|| self.counters.granules_pruned as f64 / checked as f64)
    }
}

thread_local! {
    static COUNTERS: RefCell<PruneCounters> = RefCell::new(PruneCounters::default());
}

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&PruneCounters) -> R) -> R {
    COUNTERS.with(|m| f(&m.borrow()))
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut PruneCounters) -> R) -> R {
    COUNTERS.with(|m| f(&mut m.borrow_mut()))
}

/// Snapshot the current thread's counters.
pub(crate) fn report() -> EventReport {
    EventReport {
        counters: with_state(Clone::clone),
    }
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = PruneCounters::default());
}
