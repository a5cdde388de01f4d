//! The policy engine: rule lookup, role, state, and hierarchy checks.
//!
//! Evaluation pipeline, in order:
//!
//! 1. Finalized-process override — a finalized process admits reads and
//!    nothing else; this precedes everything, including the admin bypass.
//! 2. Special-case dispatch — special-cased actions are owned end-to-end
//!    by their handlers and never reach the generic checks.
//! 3. Rule lookup — a missing rule is `UnknownAction`, logged at error
//!    level because it means the table is incomplete.
//! 4. Role check over the subject's assignments.
//! 5. State check against the rule's allowed states.
//! 6. Hierarchy check — admin-global bypass first, then the rule's
//!    requirement against the resource's unit; write actions on
//!    subprocesses check against the resolved current location instead of
//!    static ownership (custody rule).
//! 7. Allow.

use std::sync::Arc;

use tracing::{debug, error};

use custos_contracts::{
    action::{Action, ActionKind},
    decision::{Decision, DenyCause},
    resource::{ProcessState, Resource},
    rule::{HierarchyRequirement, RuleExplanation},
    subject::{Role, Subject},
    unit::UnitId,
};
use custos_core::traits::{DecisionPolicy, TransitionLog, UnitDirectory};

use crate::{
    hierarchy::HierarchyResolver,
    location::LocationResolver,
    rules::{Rule, RuleTable},
    special,
};

/// The production policy engine.
///
/// Stateless apart from the location resolver's request-scoped memo;
/// construct one per request scope (or per deployment when custody churn
/// within a request is acceptable to observe lazily).
pub struct PolicyEngine {
    rules: RuleTable,
    units: Arc<dyn UnitDirectory>,
    location: LocationResolver,
}

impl PolicyEngine {
    pub fn new(units: Arc<dyn UnitDirectory>, transitions: Arc<dyn TransitionLog>) -> Self {
        Self {
            rules: RuleTable::new(),
            units,
            location: LocationResolver::new(transitions),
        }
    }

    /// Build an engine over an explicit rule table. Exists so tests can
    /// exercise incomplete tables.
    pub fn with_table(
        rules: RuleTable,
        units: Arc<dyn UnitDirectory>,
        transitions: Arc<dyn TransitionLog>,
    ) -> Self {
        Self {
            rules,
            units,
            location: LocationResolver::new(transitions),
        }
    }

    fn check_roles(&self, subject: &Subject, action: Action, rule: &Rule) -> Option<Decision> {
        if subject.assignments.iter().any(|a| rule.roles.contains(&a.role)) {
            return None;
        }

        let permitted = rule
            .roles
            .iter()
            .map(|r| r.label())
            .collect::<Vec<_>>()
            .join(", ");
        Some(Decision::deny(
            DenyCause::Role,
            format!(
                "'{}' requires one of the roles: {}; the subject holds none of them",
                action.description(),
                permitted
            ),
        ))
    }

    fn check_state(&self, action: Action, resource: &Resource, rule: &Rule) -> Option<Decision> {
        if rule.states.admits(resource.state()) {
            return None;
        }

        Some(Decision::deny(
            DenyCause::State,
            format!(
                "'{}' requires the resource to be in {}; it is currently '{}'",
                action.description(),
                rule.states.render(),
                resource.state()
            ),
        ))
    }

    /// The unit the hierarchy requirement is checked against.
    ///
    /// Write actions on subprocesses follow current custody; everything
    /// else follows static ownership.
    fn target_unit(&self, action: Action, resource: &Resource) -> UnitId {
        match resource {
            Resource::Subprocess { id, owning_unit, .. }
                if action.kind() == ActionKind::Write =>
            {
                self.location.current_unit(id, owning_unit)
            }
            _ => resource.owning_unit().clone(),
        }
    }

    fn check_hierarchy(
        &self,
        subject: &Subject,
        action: Action,
        resource: &Resource,
        rule: &Rule,
    ) -> Option<Decision> {
        if rule.hierarchy == HierarchyRequirement::None {
            return None;
        }

        // Global administrator bypass, limited to the fixed admin-global
        // action set. Checked on the active role: an admin acting in a
        // non-admin capacity gets no shortcut.
        if subject.active_role == Role::Admin && self.rules.is_admin_global(action) {
            debug!(action = %action, "admin-global bypass");
            return None;
        }

        let target = self.target_unit(action, resource);
        let hierarchy = HierarchyResolver::new(self.units.as_ref());

        let satisfied = subject.assignments_with_roles(rule.roles).any(|assignment| {
            match rule.hierarchy {
                HierarchyRequirement::None => true,
                HierarchyRequirement::SameUnit => assignment.unit == target,
                HierarchyRequirement::SameOrDescendant => {
                    hierarchy.is_same_or_descendant(&target, &assignment.unit)
                }
                HierarchyRequirement::ImmediateParent => {
                    hierarchy.is_immediate_parent(&target, &assignment.unit)
                }
                HierarchyRequirement::UnitResponsible => {
                    hierarchy.is_unit_responsible(&target, subject)
                }
            }
        });

        if satisfied {
            return None;
        }

        let reason = match rule.hierarchy {
            HierarchyRequirement::None => unreachable!("handled above"),
            HierarchyRequirement::SameUnit => format!(
                "'{}' requires acting within unit {}",
                action.description(),
                target
            ),
            HierarchyRequirement::SameOrDescendant => format!(
                "'{}' requires unit {} to be the subject's unit or one of its subordinates",
                action.description(),
                target
            ),
            HierarchyRequirement::ImmediateParent => format!(
                "'{}' requires acting from the immediate superior of unit {}",
                action.description(),
                target
            ),
            HierarchyRequirement::UnitResponsible => format!(
                "'{}' requires being the responsible person of unit {}",
                action.description(),
                target
            ),
        };

        Some(Decision::deny(DenyCause::Hierarchy, reason))
    }
}

impl DecisionPolicy for PolicyEngine {
    fn evaluate(&self, subject: &Subject, action: Action, resource: &Resource) -> Decision {
        debug!(
            subject = %subject.id,
            action = %action,
            resource = %resource.reference(),
            "evaluating"
        );

        // ── 1. Finalized-process override ────────────────────────────────
        if resource.process_state() == ProcessState::Finalized {
            return match action.kind() {
                ActionKind::Read => Decision::Allow,
                ActionKind::Write => Decision::deny(
                    DenyCause::ProcessFinalized,
                    format!(
                        "'{}' is not permitted: the process is finalized and accepts read actions only",
                        action.description()
                    ),
                ),
            };
        }

        // ── 2. Special-case dispatch ─────────────────────────────────────
        if special::is_special(action) {
            let hierarchy = HierarchyResolver::new(self.units.as_ref());
            return special::decide(action, subject, resource, &hierarchy);
        }

        // ── 3. Rule lookup ───────────────────────────────────────────────
        let Some(rule) = self.rules.lookup(action) else {
            // Configuration defect: the table is incomplete relative to
            // the action vocabulary. Escalate to the log, deny distinctly.
            error!(action = ?action, "no authorization rule configured");
            return Decision::deny(
                DenyCause::UnknownAction,
                format!(
                    "no authorization rule configured for action '{}'",
                    action.description()
                ),
            );
        };

        // ── 4–6. Role, state, hierarchy ──────────────────────────────────
        if let Some(denial) = self.check_roles(subject, action, rule) {
            return denial;
        }
        if let Some(denial) = self.check_state(action, resource, rule) {
            return denial;
        }
        if let Some(denial) = self.check_hierarchy(subject, action, resource, rule) {
            return denial;
        }

        Decision::Allow
    }

    fn explain(&self, action: Action) -> Option<RuleExplanation> {
        self.rules.explain(action)
    }
}
