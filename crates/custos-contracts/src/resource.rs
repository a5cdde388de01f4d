//! Resource snapshots: the targets of authorized actions.
//!
//! `Resource` is a tagged union over the four resource kinds, dispatched by
//! static typing — the engine never inspects runtime types. Every variant
//! carries the lifecycle state of its parent process, because a finalized
//! process overrides all finer-grained rules.
//!
//! State freshness invariant: a snapshot's lifecycle state is authoritative
//! for exactly one decision. Callers rebuild snapshots per call; the engine
//! never caches state across calls.

use serde::{Deserialize, Serialize};

use crate::unit::UnitId;

/// Stable identifier for a resource, unique within its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four resource kinds subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Process,
    Subprocess,
    Activity,
    CompetencyMap,
}

impl ResourceKind {
    /// Lowercase label used in resource references and deny reasons.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Process => "process",
            ResourceKind::Subprocess => "subprocess",
            ResourceKind::Activity => "activity",
            ResourceKind::CompetencyMap => "map",
        }
    }
}

/// Lifecycle state of a top-level process.
///
/// `Finalized` is terminal: once a process is finalized, only read-kind
/// actions are permitted on it and everything it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessState {
    Created,
    Ongoing,
    Finalized,
}

/// Lifecycle state of a subprocess.
///
/// The workflow runs registry-first, then the competency map: the activity
/// registry is filled in, made available for review, and homologated; the
/// map is then derived from it and goes through the same review cycle.
/// "Available" is deliberately split into `RegistryAvailable` and
/// `MapAvailable` — rules that name one never mean the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubprocessState {
    NotStarted,
    RegistryInProgress,
    RegistryFinished,
    RegistryAvailable,
    RegistryHomologated,
    MapCreated,
    MapAvailable,
    MapValidated,
    MapHomologated,
}

impl SubprocessState {
    /// Human-readable label used in deny reasons.
    pub fn label(&self) -> &'static str {
        match self {
            SubprocessState::NotStarted => "not started",
            SubprocessState::RegistryInProgress => "registry in progress",
            SubprocessState::RegistryFinished => "registry finished",
            SubprocessState::RegistryAvailable => "registry available",
            SubprocessState::RegistryHomologated => "registry homologated",
            SubprocessState::MapCreated => "map created",
            SubprocessState::MapAvailable => "map available",
            SubprocessState::MapValidated => "map validated",
            SubprocessState::MapHomologated => "map homologated",
        }
    }
}

impl std::fmt::Display for SubprocessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The lifecycle state a resource exposes to the rule pipeline.
///
/// Only processes and subprocesses have meaningful multi-state lifecycles;
/// activities and competency maps expose `NotApplicable` and rules for them
/// skip the state check entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceState {
    Process(ProcessState),
    Subprocess(SubprocessState),
    NotApplicable,
}

impl std::fmt::Display for ResourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceState::Process(ProcessState::Created) => f.write_str("created"),
            ResourceState::Process(ProcessState::Ongoing) => f.write_str("ongoing"),
            ResourceState::Process(ProcessState::Finalized) => f.write_str("finalized"),
            ResourceState::Subprocess(s) => f.write_str(s.label()),
            ResourceState::NotApplicable => f.write_str("n/a"),
        }
    }
}

/// An immutable snapshot of the target resource, assembled by the caller.
///
/// Each variant exposes its owning unit and the state of its parent
/// process. The subprocess variant is the only one with a derivable
/// "current location" distinct from `owning_unit` — see the engine's
/// location resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Resource {
    Process {
        id: ResourceId,
        owning_unit: UnitId,
        state: ProcessState,
    },
    Subprocess {
        id: ResourceId,
        owning_unit: UnitId,
        state: SubprocessState,
        process_state: ProcessState,
    },
    Activity {
        id: ResourceId,
        owning_unit: UnitId,
        process_state: ProcessState,
    },
    CompetencyMap {
        id: ResourceId,
        owning_unit: UnitId,
        process_state: ProcessState,
    },
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Process { .. } => ResourceKind::Process,
            Resource::Subprocess { .. } => ResourceKind::Subprocess,
            Resource::Activity { .. } => ResourceKind::Activity,
            Resource::CompetencyMap { .. } => ResourceKind::CompetencyMap,
        }
    }

    pub fn id(&self) -> &ResourceId {
        match self {
            Resource::Process { id, .. }
            | Resource::Subprocess { id, .. }
            | Resource::Activity { id, .. }
            | Resource::CompetencyMap { id, .. } => id,
        }
    }

    /// The unit that statically owns this resource.
    ///
    /// For subprocesses this is not necessarily the unit currently holding
    /// it — custody moves with routing transitions.
    pub fn owning_unit(&self) -> &UnitId {
        match self {
            Resource::Process { owning_unit, .. }
            | Resource::Subprocess { owning_unit, .. }
            | Resource::Activity { owning_unit, .. }
            | Resource::CompetencyMap { owning_unit, .. } => owning_unit,
        }
    }

    /// The lifecycle state fed to the rule pipeline's state check.
    pub fn state(&self) -> ResourceState {
        match self {
            Resource::Process { state, .. } => ResourceState::Process(*state),
            Resource::Subprocess { state, .. } => ResourceState::Subprocess(*state),
            Resource::Activity { .. } | Resource::CompetencyMap { .. } => {
                ResourceState::NotApplicable
            }
        }
    }

    /// The subprocess lifecycle state, when this resource is a subprocess.
    pub fn subprocess_state(&self) -> Option<SubprocessState> {
        match self {
            Resource::Subprocess { state, .. } => Some(*state),
            _ => None,
        }
    }

    /// Lifecycle state of the parent process (the process itself for the
    /// process variant).
    pub fn process_state(&self) -> ProcessState {
        match self {
            Resource::Process { state, .. } => *state,
            Resource::Subprocess { process_state, .. }
            | Resource::Activity { process_state, .. }
            | Resource::CompetencyMap { process_state, .. } => *process_state,
        }
    }

    /// Compact "kind/id" string used in audit records and logs.
    ///
    /// Never includes resource payload fields — audit entries must not leak
    /// business data.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.kind().label(), self.id())
    }
}
