//! Full-stack checks: the engine behind the facade, recording into the
//! hash-chained audit sink.

use std::collections::HashMap;
use std::sync::Arc;

use custos_audit::InMemoryAuditSink;
use custos_contracts::{
    action::Action,
    decision::Decision,
    error::CustosError,
    resource::{ProcessState, Resource, ResourceId, SubprocessState},
    subject::{Role, Subject},
    unit::{OrgUnit, UnitId},
};
use custos_core::{
    traits::{TransitionLog, UnitDirectory},
    AccessGate,
};
use custos_engine::PolicyEngine;

// ── Fixtures ──────────────────────────────────────────────────────────────────

struct MapDirectory {
    units: HashMap<UnitId, OrgUnit>,
}

impl MapDirectory {
    /// U1 → U10.
    fn sample() -> Self {
        let mut units = HashMap::new();
        for unit in [
            OrgUnit::new("U1", None, "root.head"),
            OrgUnit::new("U10", Some(UnitId::new("U1")), "leaf.head"),
        ] {
            units.insert(unit.id.clone(), unit);
        }
        Self { units }
    }
}

impl UnitDirectory for MapDirectory {
    fn unit(&self, id: &UnitId) -> Option<OrgUnit> {
        self.units.get(id).cloned()
    }
}

struct NoTransitions;

impl TransitionLog for NoTransitions {
    fn latest_destination(&self, _: &ResourceId) -> Option<UnitId> {
        None
    }
}

fn gate_and_sink() -> (AccessGate, InMemoryAuditSink) {
    let engine = PolicyEngine::new(Arc::new(MapDirectory::sample()), Arc::new(NoTransitions));
    let sink = InMemoryAuditSink::new();
    let gate = AccessGate::new(Box::new(engine), Box::new(sink.clone()));
    (gate, sink)
}

fn subprocess(owning: &str, state: SubprocessState) -> Resource {
    Resource::Subprocess {
        id: ResourceId::new("SP-1"),
        owning_unit: UnitId::new(owning),
        state,
        process_state: ProcessState::Ongoing,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn every_decision_lands_in_a_valid_chain() {
    let (gate, sink) = gate_and_sink();
    let head = Subject::new("leaf.head", Role::UnitHead, "U10");
    let staff = Subject::new("outsider", Role::Staff, "U1");
    let resource = subprocess("U10", SubprocessState::RegistryInProgress);

    let allowed = gate.decide(&head, Action::EditRegistry, &resource).unwrap();
    let denied = gate.decide(&staff, Action::EditRegistry, &resource).unwrap();
    let enforced = gate.enforce(&staff, Action::EditRegistry, &resource);

    assert!(allowed.is_allow());
    assert!(!denied.is_allow());
    assert!(matches!(enforced, Err(CustosError::AccessDenied { .. })));

    // Three calls, three records, intact chain.
    assert_eq!(sink.len(), 3);
    assert!(sink.verify_integrity());

    let trail = sink.export_trail();
    assert_eq!(trail.events[0].record.decision, Decision::Allow);
    assert_eq!(trail.events[1].record.decision, denied);
    assert_eq!(trail.events[0].record.resource_ref, "subprocess/SP-1");
}

#[test]
fn special_case_path_audits_exactly_once() {
    let (gate, sink) = gate_and_sink();
    let admin = Subject::new("adm", Role::Admin, "U1");
    let resource = subprocess("U10", SubprocessState::MapValidated);

    let decision = gate.decide(&admin, Action::VerifyImpact, &resource).unwrap();

    assert!(decision.is_allow());
    assert_eq!(sink.len(), 1, "special-case decisions audit once, never twice");
}

#[test]
fn explain_supports_ui_affordances() {
    let (gate, _) = gate_and_sink();

    let explanation = gate.explain(Action::HomologateRegistry).unwrap();
    assert!(explanation.roles.contains(&Role::Manager));
    assert_eq!(
        explanation.states,
        Some(vec![SubprocessState::RegistryAvailable])
    );

    // Special-cased actions expose no generic rule.
    assert!(gate.explain(Action::ConsultForImport).is_none());
}

#[test]
fn enforce_carries_the_engine_reason() {
    let (gate, _) = gate_and_sink();
    let staff = Subject::new("stf", Role::Staff, "U10");
    let resource = subprocess("U10", SubprocessState::RegistryAvailable);

    let err = gate
        .enforce(&staff, Action::HomologateRegistry, &resource)
        .unwrap_err();

    match err {
        CustosError::AccessDenied { reason } => {
            assert!(reason.contains("homologate registry"), "reason was: {reason}");
        }
        other => panic!("expected AccessDenied, got {:?}", other),
    }
}
