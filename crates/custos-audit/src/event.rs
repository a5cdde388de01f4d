//! Audit event and trail types.
//!
//! `AuditEvent` is a single entry in the hash chain — it wraps a
//! `DecisionRecord` with sequence numbering and the SHA-256 hashes that
//! make tampering detectable. `AuditTrail` is the sealed snapshot
//! produced by `export_trail`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use custos_contracts::decision::DecisionRecord;

/// A single entry in the SHA-256 hash chain.
///
/// Each event commits to the previous event via `prev_hash`, forming an
/// append-only chain. Modifying any field — including those of the
/// embedded `record` — invalidates `this_hash` and every subsequent
/// `prev_hash`, which `verify_chain` detects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Monotonically increasing position in the chain, starting at 0.
    pub sequence: u64,

    /// The immutable decision record produced by the facade.
    pub record: DecisionRecord,

    /// SHA-256 hash (hex) of the previous event, or `GENESIS_HASH` for
    /// the first event.
    pub prev_hash: String,

    /// SHA-256 hash (hex) of this event's canonical content, computed by
    /// `hash_event()` over (sequence, prev_hash, canonical JSON of
    /// record).
    pub this_hash: String,
}

impl AuditEvent {
    /// The sentinel `prev_hash` used for the first event in every chain.
    ///
    /// 64 hex zeros — a value that can never be the SHA-256 of real data,
    /// making genesis detection unambiguous.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A sealed snapshot of the decision trail.
///
/// Produced by `InMemoryAuditSink::export_trail()`. The `terminal_hash`
/// is the `this_hash` of the last event and serves as a compact
/// commitment to the entire trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditTrail {
    /// All audit events in chain order (sequence 0 first).
    pub events: Vec<AuditEvent>,

    /// Wall-clock time (UTC) the trail was exported.
    pub exported_at: DateTime<Utc>,

    /// The `this_hash` of the last event. Empty string if the trail is
    /// empty.
    pub terminal_hash: String,
}
