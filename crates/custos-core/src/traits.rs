//! Core trait definitions for the CUSTOS decision pipeline.
//!
//! These traits define the engine's complete boundary with the rest of the
//! system:
//!
//! - `UnitDirectory`   — read-only view of the organizational unit forest
//! - `TransitionLog`   — read-only view of subprocess routing transitions
//! - `DecisionPolicy`  — the policy engine contract
//! - `AuditSink`       — append-only sink for decision records
//!
//! All I/O — loading units, transition records, resource snapshots —
//! happens behind `UnitDirectory` and `TransitionLog` in the caller's
//! responsibility. The engine itself is pure computation over the
//! snapshots these traits return, so it has no timeout or cancellation
//! semantics of its own.

use custos_contracts::{
    action::Action,
    decision::{Decision, DecisionRecord},
    error::CustosResult,
    resource::{Resource, ResourceId},
    rule::RuleExplanation,
    subject::Subject,
    unit::{OrgUnit, UnitId},
};

/// Read-only access to organizational unit snapshots.
///
/// A missing unit is a normal negative answer, never an error: the
/// hierarchy resolver treats an unreachable ancestor chain as "not
/// related" and denies on structural grounds.
pub trait UnitDirectory: Send + Sync {
    /// Return the snapshot for `id`, or `None` if the unit is not loaded.
    fn unit(&self, id: &UnitId) -> Option<OrgUnit>;
}

/// Read-only access to subprocess lifecycle-transition records.
///
/// Write authorization follows current custody, not static ownership:
/// subprocesses move between units as part of a routing workflow, and the
/// most recent transition names the unit currently holding one.
pub trait TransitionLog: Send + Sync {
    /// The destination unit of the most recent transition for
    /// `subprocess`, ordered by timestamp descending, or `None` when the
    /// subprocess has never moved (or the latest record carries no
    /// destination).
    fn latest_destination(&self, subprocess: &ResourceId) -> Option<UnitId>;
}

/// The policy engine contract: the single decision point.
///
/// Implementations must be deterministic for identical snapshots and free
/// of side effects — auditing is the facade's job, not the engine's.
pub trait DecisionPolicy: Send + Sync {
    /// Decide whether `subject` may perform `action` on `resource`.
    ///
    /// Denials are normal return values; this method has no failure mode.
    fn evaluate(&self, subject: &Subject, action: Action, resource: &Resource) -> Decision;

    /// Read-only introspection: what the rule table requires for `action`.
    ///
    /// Returns `None` for actions with no generic rule (unknown or
    /// special-cased actions).
    fn explain(&self, action: Action) -> Option<RuleExplanation>;
}

/// The append-only sink for decision records.
///
/// One append = one atomic write. Implementations must support concurrent
/// appends without lost writes; records are never modified or deleted.
pub trait AuditSink: Send + Sync {
    /// Append one decision record.
    ///
    /// A failed append is fatal for the decision being recorded — the
    /// facade does not return an unaudited decision.
    fn append(&self, record: &DecisionRecord) -> CustosResult<()>;
}
