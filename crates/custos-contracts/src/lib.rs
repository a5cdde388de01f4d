//! # custos-contracts
//!
//! Shared types and the error taxonomy for the CUSTOS authorization engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod action;
pub mod decision;
pub mod error;
pub mod resource;
pub mod rule;
pub mod subject;
pub mod unit;

#[cfg(test)]
mod tests {
    use super::*;
    use action::{Action, ActionKind};
    use decision::{Decision, DecisionRecord, DenyCause};
    use error::CustosError;
    use resource::{ProcessState, Resource, ResourceId, ResourceKind, ResourceState, SubprocessState};
    use subject::{Role, Subject, SubjectId};
    use unit::UnitId;

    // ── Subject / assignments ────────────────────────────────────────────────

    #[test]
    fn subject_new_seeds_active_assignment() {
        let subject = Subject::new("ana", Role::UnitHead, "U10");

        assert_eq!(subject.id, SubjectId::new("ana"));
        assert_eq!(subject.active_unit, UnitId::new("U10"));
        assert_eq!(subject.assignments.len(), 1);
        assert!(subject.holds_role(Role::UnitHead));
        assert!(!subject.holds_role(Role::Admin));
    }

    #[test]
    fn assignments_with_roles_filters_by_role_set() {
        let subject = Subject::new("ana", Role::UnitHead, "U10")
            .with_assignment(Role::Staff, "U20")
            .with_assignment(Role::Manager, "U1");

        let units: Vec<&str> = subject
            .assignments_with_roles(&[Role::Manager, Role::Staff])
            .map(|a| a.unit.0.as_str())
            .collect();

        assert_eq!(units, vec!["U20", "U1"]);
    }

    // ── Resource accessors ───────────────────────────────────────────────────

    #[test]
    fn subprocess_exposes_state_and_process_state() {
        let resource = Resource::Subprocess {
            id: ResourceId::new("SP-1"),
            owning_unit: UnitId::new("U10"),
            state: SubprocessState::RegistryInProgress,
            process_state: ProcessState::Ongoing,
        };

        assert_eq!(resource.kind(), ResourceKind::Subprocess);
        assert_eq!(
            resource.state(),
            ResourceState::Subprocess(SubprocessState::RegistryInProgress)
        );
        assert_eq!(resource.process_state(), ProcessState::Ongoing);
        assert_eq!(resource.reference(), "subprocess/SP-1");
    }

    #[test]
    fn activity_state_is_not_applicable() {
        let resource = Resource::Activity {
            id: ResourceId::new("AT-7"),
            owning_unit: UnitId::new("U3"),
            process_state: ProcessState::Ongoing,
        };

        assert_eq!(resource.state(), ResourceState::NotApplicable);
        assert_eq!(resource.subprocess_state(), None);
        assert_eq!(resource.state().to_string(), "n/a");
    }

    // ── Action vocabulary ────────────────────────────────────────────────────

    #[test]
    fn action_all_has_no_duplicates() {
        let unique: std::collections::HashSet<Action> = Action::ALL.iter().copied().collect();
        assert_eq!(unique.len(), Action::ALL.len());
    }

    #[test]
    fn view_actions_are_reads_and_edits_are_writes() {
        assert_eq!(Action::ViewSubprocess.kind(), ActionKind::Read);
        assert_eq!(Action::ViewAuditTrail.kind(), ActionKind::Read);
        assert_eq!(Action::EditRegistry.kind(), ActionKind::Write);
        assert_eq!(Action::HomologateMap.kind(), ActionKind::Write);
        assert_eq!(Action::TransferSubprocess.kind(), ActionKind::Write);
    }

    #[test]
    fn every_action_has_a_description() {
        for action in Action::ALL {
            assert!(
                !action.description().is_empty(),
                "{:?} has an empty description",
                action
            );
        }
    }

    // ── Decision serde round-trip ────────────────────────────────────────────

    #[test]
    fn decision_allow_round_trips() {
        let original = Decision::Allow;
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Decision = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn decision_deny_round_trips() {
        let original = Decision::deny(DenyCause::State, "registry already homologated");
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Decision = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
        assert_eq!(decoded.reason(), Some("registry already homologated"));
    }

    // ── DecisionRecord ───────────────────────────────────────────────────────

    #[test]
    fn decision_records_get_unique_ids() {
        let make = || {
            DecisionRecord::new(
                SubjectId::new("ana"),
                Action::ViewSubprocess,
                "subprocess/SP-1".to_string(),
                Decision::Allow,
            )
        };
        let ids: std::collections::HashSet<uuid::Uuid> =
            (0..50).map(|_| make().id).collect();
        assert_eq!(ids.len(), 50);
    }

    // ── Error display messages ───────────────────────────────────────────────

    #[test]
    fn error_unknown_action_display() {
        let err = CustosError::UnknownAction {
            action: "edit activity registry".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("no authorization rule configured"));
        assert!(msg.contains("edit activity registry"));
    }

    #[test]
    fn error_access_denied_display() {
        let err = CustosError::AccessDenied {
            reason: "requires role unit head".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("access denied"));
        assert!(msg.contains("requires role unit head"));
    }

    #[test]
    fn error_audit_write_failed_display() {
        let err = CustosError::AuditWriteFailed {
            reason: "sink lock poisoned".to_string(),
        };
        assert!(err.to_string().contains("audit write failed"));
    }
}
