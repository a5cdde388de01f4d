//! Organizational unit snapshot types.
//!
//! Units form a forest via the `parent` reference. The engine never loads
//! units itself — callers resolve them through a `UnitDirectory` and the
//! engine walks whatever snapshot that directory exposes.

use serde::{Deserialize, Serialize};

use crate::subject::SubjectId;

/// Stable identifier for an organizational unit.
///
/// Example: UnitId("U10")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub String);

impl UnitId {
    /// Construct a unit id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a unit in the organizational directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStatus {
    Active,
    Inactive,
}

/// An immutable snapshot of one organizational unit.
///
/// `parent` is `None` for roots. `responsible` identifies the person
/// accountable for the unit — some actions require the subject to be
/// exactly this person (`HierarchyRequirement::UnitResponsible`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgUnit {
    pub id: UnitId,
    pub parent: Option<UnitId>,
    pub responsible: SubjectId,
    pub status: UnitStatus,
}

impl OrgUnit {
    /// Build an active unit snapshot.
    pub fn new(
        id: impl Into<String>,
        parent: Option<UnitId>,
        responsible: impl Into<String>,
    ) -> Self {
        Self {
            id: UnitId::new(id),
            parent,
            responsible: SubjectId::new(responsible),
            status: UnitStatus::Active,
        }
    }
}
