//! Rule vocabulary shared between the engine and its callers.
//!
//! The rule table itself lives in `custos-engine`; this module only holds
//! the data shapes callers see through the `explain` introspection call.

use serde::{Deserialize, Serialize};

use crate::{resource::SubprocessState, subject::Role};

/// The structural relation required between the subject's unit and the
/// resource's unit for an action to be allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HierarchyRequirement {
    /// No structural relation required.
    None,
    /// Subject's unit must equal the resource's unit.
    SameUnit,
    /// Subject's unit must equal the resource's unit or be one of its
    /// ancestors.
    SameOrDescendant,
    /// Subject's unit must be the immediate parent of the resource's unit.
    ImmediateParent,
    /// The subject must be the responsible person of the resource's unit.
    UnitResponsible,
}

impl HierarchyRequirement {
    /// Human-readable label used in deny reasons.
    pub fn label(&self) -> &'static str {
        match self {
            HierarchyRequirement::None => "no unit relation",
            HierarchyRequirement::SameUnit => "same unit",
            HierarchyRequirement::SameOrDescendant => "same unit or a subordinate unit",
            HierarchyRequirement::ImmediateParent => "immediate superior unit",
            HierarchyRequirement::UnitResponsible => "unit responsible",
        }
    }
}

/// What the rule table requires for one action, as exposed to callers.
///
/// Useful for UI affordances — e.g. disabling a button before the call is
/// even attempted. `states` is `None` for actions whose rule skips the
/// state check (stateless resource kinds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleExplanation {
    pub roles: Vec<Role>,
    pub states: Option<Vec<SubprocessState>>,
    pub hierarchy: HierarchyRequirement,
}
