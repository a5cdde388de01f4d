//! # custos-core
//!
//! Trait seams and the access-control facade for the CUSTOS engine.
//!
//! This crate provides:
//! - The four boundary traits (`UnitDirectory`, `TransitionLog`,
//!   `DecisionPolicy`, `AuditSink`)
//! - The `AccessGate` facade that wires a policy to an audit sink and
//!   guarantees exactly one audit record per decision
//!
//! ## Usage
//!
//! ```rust,ignore
//! use custos_core::{AccessGate, traits::{DecisionPolicy, AuditSink}};
//!
//! let gate = AccessGate::new(Box::new(policy), Box::new(sink));
//! let decision = gate.decide(&subject, Action::ViewSubprocess, &resource)?;
//! ```

pub mod gate;
pub mod traits;

pub use gate::AccessGate;

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use custos_contracts::{
        action::Action,
        decision::{Decision, DecisionRecord, DenyCause},
        error::{CustosError, CustosResult},
        resource::{ProcessState, Resource, ResourceId, SubprocessState},
        rule::RuleExplanation,
        subject::{Role, Subject},
        unit::UnitId,
    };

    use crate::{
        traits::{AuditSink, DecisionPolicy},
        AccessGate,
    };

    // ── Test doubles ─────────────────────────────────────────────────────────

    /// A policy that returns a canned decision and counts evaluations.
    struct FixedPolicy {
        decision: Decision,
        evaluations: AtomicUsize,
    }

    impl FixedPolicy {
        fn new(decision: Decision) -> Self {
            Self {
                decision,
                evaluations: AtomicUsize::new(0),
            }
        }
    }

    impl DecisionPolicy for FixedPolicy {
        fn evaluate(&self, _: &Subject, _: Action, _: &Resource) -> Decision {
            self.evaluations.fetch_add(1, Ordering::SeqCst);
            self.decision.clone()
        }

        fn explain(&self, _: Action) -> Option<RuleExplanation> {
            None
        }
    }

    /// An audit sink that stores records, or fails on demand.
    #[derive(Clone, Default)]
    struct RecordingSink {
        records: Arc<Mutex<Vec<DecisionRecord>>>,
        fail: bool,
    }

    impl AuditSink for RecordingSink {
        fn append(&self, record: &DecisionRecord) -> CustosResult<()> {
            if self.fail {
                return Err(CustosError::AuditWriteFailed {
                    reason: "sink unavailable".to_string(),
                });
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn subprocess() -> Resource {
        Resource::Subprocess {
            id: ResourceId::new("SP-1"),
            owning_unit: UnitId::new("U10"),
            state: SubprocessState::RegistryInProgress,
            process_state: ProcessState::Ongoing,
        }
    }

    // ── decide ───────────────────────────────────────────────────────────────

    #[test]
    fn decide_audits_exactly_once_per_call() {
        let sink = RecordingSink::default();
        let gate = AccessGate::new(
            Box::new(FixedPolicy::new(Decision::Allow)),
            Box::new(sink.clone()),
        );
        let subject = Subject::new("ana", Role::Staff, "U10");

        gate.decide(&subject, Action::ViewSubprocess, &subprocess())
            .unwrap();
        gate.decide(&subject, Action::ViewSubprocess, &subprocess())
            .unwrap();

        assert_eq!(sink.records.lock().unwrap().len(), 2);
    }

    #[test]
    fn decide_record_matches_returned_decision() {
        let sink = RecordingSink::default();
        let denial = Decision::deny(DenyCause::Role, "requires role unit head");
        let gate = AccessGate::new(
            Box::new(FixedPolicy::new(denial.clone())),
            Box::new(sink.clone()),
        );
        let subject = Subject::new("ana", Role::Staff, "U10");

        let decision = gate
            .decide(&subject, Action::EditRegistry, &subprocess())
            .unwrap();

        assert_eq!(decision, denial);
        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].decision, denial);
        assert_eq!(records[0].resource_ref, "subprocess/SP-1");
        assert_eq!(records[0].action, Action::EditRegistry);
    }

    #[test]
    fn decide_fails_when_audit_append_fails() {
        let sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        let gate = AccessGate::new(
            Box::new(FixedPolicy::new(Decision::Allow)),
            Box::new(sink),
        );
        let subject = Subject::new("ana", Role::Staff, "U10");

        let result = gate.decide(&subject, Action::ViewSubprocess, &subprocess());

        match result {
            Err(CustosError::AuditWriteFailed { .. }) => {}
            other => panic!("expected AuditWriteFailed, got {:?}", other),
        }
    }

    // ── enforce ──────────────────────────────────────────────────────────────

    #[test]
    fn enforce_returns_ok_on_allow() {
        let sink = RecordingSink::default();
        let gate = AccessGate::new(
            Box::new(FixedPolicy::new(Decision::Allow)),
            Box::new(sink.clone()),
        );
        let subject = Subject::new("ana", Role::Staff, "U10");

        gate.enforce(&subject, Action::ViewSubprocess, &subprocess())
            .unwrap();

        assert_eq!(sink.records.lock().unwrap().len(), 1);
    }

    #[test]
    fn enforce_raises_access_denied_and_audits_once() {
        let sink = RecordingSink::default();
        let gate = AccessGate::new(
            Box::new(FixedPolicy::new(Decision::deny(
                DenyCause::Hierarchy,
                "subprocess belongs to another unit",
            ))),
            Box::new(sink.clone()),
        );
        let subject = Subject::new("ana", Role::Staff, "U10");

        let result = gate.enforce(&subject, Action::EditRegistry, &subprocess());

        match result {
            Err(CustosError::AccessDenied { reason }) => {
                assert!(reason.contains("another unit"));
            }
            other => panic!("expected AccessDenied, got {:?}", other),
        }
        // One record from the inner decide; enforce adds nothing.
        assert_eq!(sink.records.lock().unwrap().len(), 1);
    }
}
