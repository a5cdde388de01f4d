//! Subject identity, roles, and role assignments.
//!
//! A `Subject` is an already-authenticated actor. Authentication itself is
//! out of scope — the engine receives the subject fully formed and treats
//! it as immutable for the duration of one decision.

use serde::{Deserialize, Serialize};

use crate::unit::UnitId;

/// Opaque identity token for a subject.
///
/// Example: SubjectId("maria.souza")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl SubjectId {
    /// Construct a subject id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed role vocabulary.
///
/// No total order is assumed between roles. `Admin` carries global-bypass
/// semantics only for the fixed admin-global action set — everywhere else
/// it is checked like any other role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
    UnitHead,
    Staff,
}

impl Role {
    /// Human-readable label used in deny reasons.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "administrator",
            Role::Manager => "manager",
            Role::UnitHead => "unit head",
            Role::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One (role, unit) pair held by a subject.
///
/// A subject may hold several assignments simultaneously — e.g. unit head
/// of one unit and staff in another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub role: Role,
    pub unit: UnitId,
}

impl Assignment {
    pub fn new(role: Role, unit: impl Into<String>) -> Self {
        Self {
            role,
            unit: UnitId::new(unit),
        }
    }
}

/// The authenticated actor requesting an action.
///
/// Role and hierarchy checks evaluate over `assignments`: a subject passes
/// when any assignment carries a permitted role and that assignment's unit
/// satisfies the hierarchy requirement. The `active_role`/`active_unit`
/// pair is consulted only by the admin global bypass and by special-case
/// handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub active_role: Role,
    pub active_unit: UnitId,
    pub assignments: Vec<Assignment>,
}

impl Subject {
    /// Build a subject whose only assignment is the active (role, unit) pair.
    pub fn new(id: impl Into<String>, active_role: Role, active_unit: impl Into<String>) -> Self {
        let active_unit = UnitId::new(active_unit);
        Self {
            id: SubjectId::new(id),
            active_role,
            active_unit: active_unit.clone(),
            assignments: vec![Assignment {
                role: active_role,
                unit: active_unit,
            }],
        }
    }

    /// Add a further (role, unit) assignment.
    pub fn with_assignment(mut self, role: Role, unit: impl Into<String>) -> Self {
        self.assignments.push(Assignment::new(role, unit));
        self
    }

    /// Iterate the assignments whose role is contained in `roles`.
    pub fn assignments_with_roles<'a>(
        &'a self,
        roles: &'a [Role],
    ) -> impl Iterator<Item = &'a Assignment> {
        self.assignments
            .iter()
            .filter(move |a| roles.contains(&a.role))
    }

    /// True if any assignment carries `role`.
    pub fn holds_role(&self, role: Role) -> bool {
        self.assignments.iter().any(|a| a.role == role)
    }
}
