//! The static rule table: Action → (roles, states, hierarchy requirement).
//!
//! Rules are code-defined load-time constants, not runtime configuration —
//! the vocabulary is closed and so is the table. An action with no entry
//! and no special-case handler is a configuration defect surfaced as
//! `UnknownAction`, never a silent deny, so an incomplete table is caught
//! during rollout rather than buried in generic denials.

use std::collections::{HashMap, HashSet};

use custos_contracts::{
    action::Action,
    resource::{ProcessState, ResourceState, SubprocessState},
    rule::{HierarchyRequirement, RuleExplanation},
    subject::Role,
};

use SubprocessState::*;

/// The lifecycle states a rule admits.
///
/// `Any` skips the state check — used for actions on stateless resource
/// kinds (activities, maps as standalone resources, units) and for
/// lifecycle-indifferent reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSet {
    Any,
    Subprocess(&'static [SubprocessState]),
    Process(&'static [ProcessState]),
}

impl StateSet {
    /// True if `state` satisfies this set.
    ///
    /// A rule constraining subprocess states never admits a resource of a
    /// different kind — a kind mismatch is a negative answer.
    pub fn admits(&self, state: ResourceState) -> bool {
        match (self, state) {
            (StateSet::Any, _) => true,
            (StateSet::Subprocess(allowed), ResourceState::Subprocess(s)) => allowed.contains(&s),
            (StateSet::Process(allowed), ResourceState::Process(s)) => allowed.contains(&s),
            _ => false,
        }
    }

    /// Render the allowed set for a deny reason.
    ///
    /// Sets larger than five entries are rendered compactly so messages
    /// stay readable.
    pub fn render(&self) -> String {
        match self {
            StateSet::Any => "any state".to_string(),
            StateSet::Subprocess(allowed) if allowed.len() > 5 => {
                format!("one of {} permitted states", allowed.len())
            }
            StateSet::Subprocess(allowed) => allowed
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(", "),
            StateSet::Process(allowed) => allowed
                .iter()
                .map(|s| match s {
                    ProcessState::Created => "created",
                    ProcessState::Ongoing => "ongoing",
                    ProcessState::Finalized => "finalized",
                })
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// One generic authorization rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub roles: &'static [Role],
    pub states: StateSet,
    pub hierarchy: HierarchyRequirement,
}

const fn rule(
    roles: &'static [Role],
    states: StateSet,
    hierarchy: HierarchyRequirement,
) -> Rule {
    Rule {
        roles,
        states,
        hierarchy,
    }
}

const ALL_ROLES: &[Role] = &[Role::Admin, Role::Manager, Role::UnitHead, Role::Staff];
const ADMIN: &[Role] = &[Role::Admin];
const ADMIN_MANAGER: &[Role] = &[Role::Admin, Role::Manager];
const UNIT_STAFF: &[Role] = &[Role::UnitHead, Role::Staff];
const UNIT_HEAD: &[Role] = &[Role::UnitHead];

use custos_contracts::rule::HierarchyRequirement as H;
use StateSet::{Any, Process as ProcStates, Subprocess as SubStates};

/// The static mapping from action to rule, plus the two load-time constant
/// action sets: admin-global (active-role admins bypass the hierarchy
/// check) and special-cased (delegated to dedicated handlers).
#[derive(Debug)]
pub struct RuleTable {
    rules: HashMap<Action, Rule>,
    admin_global: HashSet<Action>,
}

impl RuleTable {
    /// Build the full production table, covering every action that is not
    /// special-cased.
    pub fn new() -> Self {
        let mut rules = HashMap::new();
        let mut put = |action: Action, r: Rule| {
            rules.insert(action, r);
        };

        // Process administration. Process lifecycle is owned centrally, so
        // these are admin operations with no unit scoping.
        put(Action::ViewProcess, rule(ALL_ROLES, Any, H::SameOrDescendant));
        put(Action::ListProcesses, rule(ALL_ROLES, Any, H::None));
        put(Action::CreateProcess, rule(ADMIN, Any, H::None));
        put(
            Action::EditProcess,
            rule(
                ADMIN,
                ProcStates(&[ProcessState::Created, ProcessState::Ongoing]),
                H::None,
            ),
        );
        put(
            Action::DeleteProcess,
            rule(ADMIN, ProcStates(&[ProcessState::Created]), H::None),
        );
        put(
            Action::StartProcess,
            rule(ADMIN, ProcStates(&[ProcessState::Created]), H::None),
        );
        put(
            Action::FinalizeProcess,
            rule(ADMIN, ProcStates(&[ProcessState::Ongoing]), H::None),
        );
        put(Action::ExportProcessReport, rule(ALL_ROLES, Any, H::None));

        // Subprocess administration and the registry lifecycle. Registry
        // work happens inside the holding unit; homologation and returns
        // come from the immediate superior unit.
        put(Action::ViewSubprocess, rule(ALL_ROLES, Any, H::SameOrDescendant));
        put(Action::CreateSubprocess, rule(ADMIN_MANAGER, Any, H::SameOrDescendant));
        put(
            Action::EditSubprocess,
            rule(
                ADMIN_MANAGER,
                SubStates(&[NotStarted, RegistryInProgress]),
                H::SameOrDescendant,
            ),
        );
        put(
            Action::DeleteSubprocess,
            rule(ADMIN, SubStates(&[NotStarted]), H::None),
        );
        put(
            Action::ReopenSubprocess,
            rule(
                ADMIN,
                SubStates(&[
                    RegistryHomologated,
                    MapCreated,
                    MapAvailable,
                    MapValidated,
                    MapHomologated,
                ]),
                H::None,
            ),
        );
        put(
            Action::StartRegistry,
            rule(UNIT_STAFF, SubStates(&[NotStarted]), H::SameUnit),
        );
        put(
            Action::EditRegistry,
            rule(UNIT_STAFF, SubStates(&[RegistryInProgress]), H::SameUnit),
        );
        put(
            Action::FinishRegistry,
            rule(UNIT_HEAD, SubStates(&[RegistryInProgress]), H::SameUnit),
        );
        put(
            Action::MakeRegistryAvailable,
            rule(UNIT_HEAD, SubStates(&[RegistryFinished]), H::SameUnit),
        );
        put(
            Action::HomologateRegistry,
            rule(ADMIN_MANAGER, SubStates(&[RegistryAvailable]), H::ImmediateParent),
        );
        put(
            Action::ReturnRegistry,
            rule(ADMIN_MANAGER, SubStates(&[RegistryAvailable]), H::ImmediateParent),
        );
        put(Action::ViewRegistryHistory, rule(ALL_ROLES, Any, H::SameOrDescendant));

        // Competency map lifecycle. Maps are derived from homologated
        // registries; validation happens in the holding unit, homologation
        // in the superior unit.
        put(Action::ViewMap, rule(ALL_ROLES, Any, H::SameOrDescendant));
        put(
            Action::CreateMap,
            rule(ADMIN_MANAGER, SubStates(&[RegistryHomologated]), H::SameOrDescendant),
        );
        put(
            Action::EditMap,
            rule(ADMIN_MANAGER, SubStates(&[MapCreated]), H::SameOrDescendant),
        );
        put(
            Action::DeleteMap,
            rule(ADMIN, SubStates(&[MapCreated]), H::None),
        );
        put(
            Action::MakeMapAvailable,
            rule(ADMIN_MANAGER, SubStates(&[MapCreated]), H::SameOrDescendant),
        );
        put(
            Action::ValidateMap,
            rule(UNIT_HEAD, SubStates(&[MapAvailable]), H::SameUnit),
        );
        put(
            Action::SuggestMapAdjustment,
            rule(UNIT_STAFF, SubStates(&[MapAvailable]), H::SameUnit),
        );
        put(
            Action::FinishMapAdjustment,
            rule(ADMIN_MANAGER, SubStates(&[MapAvailable]), H::SameOrDescendant),
        );
        put(
            Action::HomologateMap,
            rule(ADMIN_MANAGER, SubStates(&[MapValidated]), H::ImmediateParent),
        );
        put(
            Action::ReturnMap,
            rule(ADMIN_MANAGER, SubStates(&[MapValidated]), H::ImmediateParent),
        );
        put(Action::ExportMap, rule(ALL_ROLES, Any, H::SameOrDescendant));

        // Activities and knowledge items. These carry no lifecycle of
        // their own; the state check is skipped and unit scoping does the
        // work.
        put(Action::ViewActivity, rule(ALL_ROLES, Any, H::SameOrDescendant));
        put(Action::CreateActivity, rule(UNIT_STAFF, Any, H::SameUnit));
        put(Action::EditActivity, rule(UNIT_STAFF, Any, H::SameUnit));
        put(Action::DeleteActivity, rule(UNIT_STAFF, Any, H::SameUnit));
        put(Action::ImportActivities, rule(UNIT_HEAD, Any, H::SameUnit));
        put(Action::ExportActivities, rule(ALL_ROLES, Any, H::SameOrDescendant));
        put(Action::AddKnowledge, rule(UNIT_STAFF, Any, H::SameUnit));
        put(Action::EditKnowledge, rule(UNIT_STAFF, Any, H::SameUnit));
        put(Action::RemoveKnowledge, rule(UNIT_STAFF, Any, H::SameUnit));

        // Organizational units.
        put(Action::ViewUnit, rule(ALL_ROLES, Any, H::None));
        put(Action::ViewUnitTree, rule(ALL_ROLES, Any, H::None));
        put(Action::EditUnitResponsible, rule(ADMIN, Any, H::None));

        // Custody routing. Accept/return act on the unit currently holding
        // the subprocess, which is why these are same-unit against the
        // resolved current location rather than static ownership.
        put(Action::TransferSubprocess, rule(ADMIN_MANAGER, Any, H::SameOrDescendant));
        put(Action::AcceptTransfer, rule(UNIT_HEAD, Any, H::SameUnit));
        put(Action::ReturnTransfer, rule(UNIT_HEAD, Any, H::SameUnit));
        put(Action::ViewTransferHistory, rule(ALL_ROLES, Any, H::SameOrDescendant));

        // Reporting and administration.
        put(Action::ViewDashboard, rule(ALL_ROLES, Any, H::None));
        put(
            Action::ViewReport,
            rule(&[Role::Admin, Role::Manager, Role::UnitHead], Any, H::None),
        );
        put(Action::ViewAdminPanel, rule(ADMIN, Any, H::None));
        put(Action::ViewAuditTrail, rule(ADMIN, Any, H::None));
        put(
            Action::ManageAttributions,
            rule(&[Role::Admin, Role::UnitHead], Any, H::UnitResponsible),
        );
        put(Action::NotifyUnit, rule(ADMIN_MANAGER, Any, H::SameOrDescendant));

        Self {
            rules,
            admin_global: Self::admin_global_actions(),
        }
    }

    /// Build a table from explicit rules, keeping the production
    /// admin-global set. Exists so tests can exercise incomplete tables.
    pub fn with_rules(rules: HashMap<Action, Rule>) -> Self {
        Self {
            rules,
            admin_global: Self::admin_global_actions(),
        }
    }

    /// The fixed set of actions where an active-role administrator
    /// bypasses the hierarchy check.
    ///
    /// Deliberately excludes every action whose requirement is unit-scoped
    /// (same-unit custody work, immediate-parent homologations) or
    /// responsible-person-scoped — an administrator does not do a unit's
    /// registry work by fiat.
    fn admin_global_actions() -> HashSet<Action> {
        [
            Action::ViewProcess,
            Action::ViewSubprocess,
            Action::CreateSubprocess,
            Action::EditSubprocess,
            Action::ViewRegistryHistory,
            Action::ViewMap,
            Action::CreateMap,
            Action::EditMap,
            Action::MakeMapAvailable,
            Action::FinishMapAdjustment,
            Action::ExportMap,
            Action::ViewActivity,
            Action::ExportActivities,
            Action::TransferSubprocess,
            Action::ViewTransferHistory,
            Action::NotifyUnit,
        ]
        .into_iter()
        .collect()
    }

    /// The rule for `action`, or `None` — which the engine surfaces as
    /// `UnknownAction` for non-special actions.
    pub fn lookup(&self, action: Action) -> Option<&Rule> {
        self.rules.get(&action)
    }

    /// True if an active-role administrator bypasses the hierarchy check
    /// for `action`.
    pub fn is_admin_global(&self, action: Action) -> bool {
        self.admin_global.contains(&action)
    }

    /// Read-only introspection for UI affordances.
    pub fn explain(&self, action: Action) -> Option<RuleExplanation> {
        self.lookup(action).map(|r| RuleExplanation {
            roles: r.roles.to_vec(),
            states: match r.states {
                StateSet::Subprocess(allowed) => Some(allowed.to_vec()),
                StateSet::Any | StateSet::Process(_) => None,
            },
            hierarchy: r.hierarchy,
        })
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}
