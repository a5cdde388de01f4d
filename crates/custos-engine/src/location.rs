//! Current-location resolution for subprocesses.
//!
//! A subprocess's *current* controlling unit is distinct from its *static*
//! owning unit: custody moves between units as part of the routing
//! workflow, and write authorization follows custody. The current unit is
//! derived from the most recent lifecycle-transition record and memoized
//! in an explicit side-table — resolution is correctness-equivalent
//! without the memo, but repeated checks within one request would hit the
//! transition log over and over.
//!
//! The side-table is owned by the resolver instance, which callers scope
//! per request. Invalidation is therefore implicit: a new request gets a
//! new resolver. Domain objects are never mutated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use custos_contracts::{
    resource::ResourceId,
    unit::UnitId,
};
use custos_core::traits::TransitionLog;

/// Derives and memoizes the unit currently holding a subprocess.
pub struct LocationResolver {
    transitions: Arc<dyn TransitionLog>,
    memo: Mutex<HashMap<ResourceId, UnitId>>,
}

impl LocationResolver {
    pub fn new(transitions: Arc<dyn TransitionLog>) -> Self {
        Self {
            transitions,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// The unit currently holding `subprocess`.
    ///
    /// Resolution order: memo hit, else the destination of the most recent
    /// transition record, else the static `owning_unit`. Whatever is
    /// resolved is memoized, so the transition log is consulted at most
    /// once per subprocess per resolver instance.
    pub fn current_unit(&self, subprocess: &ResourceId, owning_unit: &UnitId) -> UnitId {
        let mut memo = self.memo.lock().expect("location memo lock poisoned");

        if let Some(unit) = memo.get(subprocess) {
            return unit.clone();
        }

        let resolved = self
            .transitions
            .latest_destination(subprocess)
            .unwrap_or_else(|| owning_unit.clone());

        debug!(
            subprocess = %subprocess,
            unit = %resolved,
            "resolved current location"
        );

        memo.insert(subprocess.clone(), resolved.clone());
        resolved
    }
}
