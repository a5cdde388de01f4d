//! In-memory implementation of `AuditSink`.
//!
//! `InMemoryAuditSink` keeps all events in a `Vec` protected by a
//! `Mutex`, so concurrent evaluations can append without lost writes —
//! one append is one atomic write under the lock.
//!
//! Use `export_trail()` to obtain a sealed `AuditTrail`, and
//! `verify_integrity()` at any time to confirm the chain has not been
//! tampered with in memory.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use custos_contracts::{
    decision::DecisionRecord,
    error::{CustosError, CustosResult},
};
use custos_core::traits::AuditSink;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AuditEvent, AuditTrail},
};

// ── Internal mutable state ────────────────────────────────────────────────────

/// The mutable interior of an `InMemoryAuditSink`.
pub(crate) struct SinkState {
    /// All events written so far, in append order.
    pub(crate) events: Vec<AuditEvent>,

    /// The next sequence number to assign (starts at 0).
    pub(crate) sequence: u64,

    /// The `this_hash` of the last written event, or `GENESIS_HASH`
    /// before any event has been written.
    pub(crate) last_hash: String,
}

// ── Public sink ───────────────────────────────────────────────────────────────

/// An in-memory, append-only audit sink backed by a SHA-256 hash chain.
///
/// # Thread safety
///
/// `append()` acquires a `Mutex` internally; the facade and any number of
/// concurrent evaluations may share one sink without additional
/// synchronization.
pub struct InMemoryAuditSink {
    pub(crate) state: Arc<Mutex<SinkState>>,
}

impl InMemoryAuditSink {
    /// Create an empty sink.
    ///
    /// The internal `last_hash` starts at `AuditEvent::GENESIS_HASH` so
    /// the first event's `prev_hash` is automatically correct.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SinkState {
                events: Vec::new(),
                sequence: 0,
                last_hash: AuditEvent::GENESIS_HASH.to_string(),
            })),
        }
    }

    /// Number of events appended so far.
    pub fn len(&self) -> usize {
        self.state.lock().expect("audit state lock poisoned").events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export a sealed `AuditTrail` containing all events written so far.
    pub fn export_trail(&self) -> AuditTrail {
        let state = self.state.lock().expect("audit state lock poisoned");
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        info!(
            event_count = state.events.len(),
            terminal_hash = %terminal_hash,
            "audit trail exported"
        );

        AuditTrail {
            events: state.events.clone(),
            exported_at: Utc::now(),
            terminal_hash,
        }
    }

    /// Verify that the in-memory chain has not been tampered with.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock().expect("audit state lock poisoned");
        verify_chain(&state.events)
    }
}

impl Default for InMemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryAuditSink {
    /// Clones share the underlying chain — handy for handing the same
    /// sink to a gate and to an inspector.
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl AuditSink for InMemoryAuditSink {
    /// Append one decision record to the hash chain.
    ///
    /// Computes `this_hash` from (sequence, prev_hash, record), wraps the
    /// record in an `AuditEvent`, appends it, then advances the sequence
    /// counter and `last_hash`.
    ///
    /// Returns `Err(AuditWriteFailed)` only if the internal mutex is
    /// poisoned, which cannot happen under normal operation.
    fn append(&self, record: &DecisionRecord) -> CustosResult<()> {
        let mut state = self.state.lock().map_err(|e| CustosError::AuditWriteFailed {
            reason: format!("audit state lock poisoned: {}", e),
        })?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;

        let this_hash = hash_event(sequence, record, &prev_hash);

        let event = AuditEvent {
            sequence,
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        };

        state.events.push(event);
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(())
    }
}
