//! # custos-audit
//!
//! Immutable, append-only, SHA-256 hash-chained decision trail for the
//! CUSTOS engine.
//!
//! ## Overview
//!
//! Every decision the facade records is wrapped in an `AuditEvent` that
//! links to the previous event via its SHA-256 hash. Tampering with any
//! event — even a single byte — breaks the chain and is detected by
//! `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use custos_audit::InMemoryAuditSink;
//! use custos_core::traits::AuditSink;
//!
//! let sink = InMemoryAuditSink::new();
//! sink.append(&record)?;
//!
//! assert!(sink.verify_integrity());
//! let trail = sink.export_trail();
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{AuditEvent, AuditTrail};
pub use memory::InMemoryAuditSink;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use custos_contracts::{
        action::Action,
        decision::{Decision, DecisionRecord, DenyCause},
        subject::SubjectId,
    };
    use custos_core::traits::AuditSink;

    use super::{AuditEvent, InMemoryAuditSink};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Build a decision record with a distinguishable subject.
    fn make_record(subject: &str, decision: Decision) -> DecisionRecord {
        DecisionRecord::new(
            SubjectId::new(subject),
            Action::ViewSubprocess,
            "subprocess/SP-1".to_string(),
            decision,
        )
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    /// Appending three events produces a valid chain.
    #[test]
    fn test_hash_chain_integrity() {
        let sink = InMemoryAuditSink::new();
        sink.append(&make_record("first", Decision::Allow)).unwrap();
        sink.append(&make_record("second", Decision::Allow)).unwrap();
        sink.append(&make_record(
            "third",
            Decision::deny(DenyCause::Role, "requires manager"),
        ))
        .unwrap();

        assert!(sink.verify_integrity(), "chain must be valid after sequential appends");
    }

    /// Mutating any event's record field breaks the chain.
    #[test]
    fn test_tamper_detection() {
        let sink = InMemoryAuditSink::new();
        sink.append(&make_record("a", Decision::Allow)).unwrap();
        sink.append(&make_record("b", Decision::Allow)).unwrap();
        sink.append(&make_record("c", Decision::Allow)).unwrap();

        // Directly mutate the internal state to simulate tampering:
        // flip the first event's outcome.
        {
            let mut state = sink.state.lock().unwrap();
            state.events[0].record.decision =
                Decision::deny(DenyCause::Hierarchy, "TAMPERED");
        }

        assert!(
            !sink.verify_integrity(),
            "chain must detect tampering with a stored event"
        );
    }

    /// The first event's `prev_hash` must equal `AuditEvent::GENESIS_HASH`.
    #[test]
    fn test_genesis_hash() {
        let sink = InMemoryAuditSink::new();
        sink.append(&make_record("first", Decision::Allow)).unwrap();

        let trail = sink.export_trail();
        assert_eq!(trail.events.len(), 1);
        assert_eq!(
            trail.events[0].prev_hash,
            AuditEvent::GENESIS_HASH,
            "first event must link to the genesis sentinel hash"
        );
    }

    /// Sequence numbers must be 0, 1, 2, … with no gaps or skips.
    #[test]
    fn test_sequence_monotonic() {
        let sink = InMemoryAuditSink::new();
        sink.append(&make_record("a", Decision::Allow)).unwrap();
        sink.append(&make_record("b", Decision::Allow)).unwrap();
        sink.append(&make_record("c", Decision::Allow)).unwrap();

        let trail = sink.export_trail();
        for (idx, event) in trail.events.iter().enumerate() {
            assert_eq!(
                event.sequence, idx as u64,
                "sequence at position {} should be {}",
                idx, idx
            );
        }
    }

    /// `export_trail()` contains every appended event in order, and the
    /// terminal hash commits to the last event.
    #[test]
    fn test_export_trail() {
        let sink = InMemoryAuditSink::new();
        sink.append(&make_record("alpha", Decision::Allow)).unwrap();
        sink.append(&make_record("beta", Decision::Allow)).unwrap();
        sink.append(&make_record("gamma", Decision::Allow)).unwrap();

        let trail = sink.export_trail();

        assert_eq!(trail.events.len(), 3, "trail must contain all appended events");
        assert_eq!(
            trail.terminal_hash,
            trail.events.last().unwrap().this_hash,
            "terminal_hash must equal the last event's this_hash"
        );
        assert!(
            super::verify_chain(&trail.events),
            "exported trail must pass chain verification"
        );
    }

    /// An empty chain is trivially valid — there is nothing to verify.
    #[test]
    fn test_verify_empty() {
        let sink = InMemoryAuditSink::new();
        assert!(sink.is_empty());
        assert!(sink.verify_integrity(), "an empty chain must be considered valid");
        assert!(super::verify_chain(&[]), "verify_chain on empty slice must return true");
    }

    /// Concurrent appends never lose writes or corrupt the chain.
    #[test]
    fn test_concurrent_appends() {
        let sink = InMemoryAuditSink::new();

        std::thread::scope(|scope| {
            for t in 0..4 {
                let sink = sink.clone();
                scope.spawn(move || {
                    for i in 0..25 {
                        let record =
                            make_record(&format!("subject-{}-{}", t, i), Decision::Allow);
                        sink.append(&record).unwrap();
                    }
                });
            }
        });

        assert_eq!(sink.len(), 100, "all concurrent appends must land");
        assert!(sink.verify_integrity(), "chain must stay valid under contention");
    }
}
