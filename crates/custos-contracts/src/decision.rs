//! Decision and audit-record types.
//!
//! The engine emits a `Decision` for every evaluation; the facade wraps it
//! in a `DecisionRecord` and appends it to the audit sink. Records are
//! append-only and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{action::Action, subject::SubjectId};

/// Which pipeline step produced a denial.
///
/// `UnknownAction` is special: it indicates the rule table is incomplete
/// relative to the action vocabulary and should alert operators, even
/// though it surfaces to callers as an ordinary deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenyCause {
    ProcessFinalized,
    UnknownAction,
    Role,
    State,
    Hierarchy,
    SpecialCase,
}

/// The outcome of one authorization decision.
///
/// Deny reasons are written for end users: they name the action, the
/// requirement that failed, and the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The action is permitted.
    Allow,

    /// The action is denied.
    Deny {
        /// The pipeline step that produced the denial.
        cause: DenyCause,
        /// Human-readable explanation, written to the audit trail.
        reason: String,
    },
}

impl Decision {
    /// Shorthand constructor for a denial.
    pub fn deny(cause: DenyCause, reason: impl Into<String>) -> Self {
        Decision::Deny {
            cause,
            reason: reason.into(),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// The deny reason, or `None` for an allow.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Deny { reason, .. } => Some(reason),
        }
    }
}

/// One immutable entry in the audit trail.
///
/// `resource_ref` is the compact "kind/id" string — never the resource
/// payload, so sensitive business fields stay out of the logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Unique id for this record.
    pub id: uuid::Uuid,
    /// Who asked.
    pub subject: SubjectId,
    /// What they asked to do.
    pub action: Action,
    /// Compact reference to the target resource ("subprocess/SP-1").
    pub resource_ref: String,
    /// The outcome, including the deny reason when applicable.
    pub decision: Decision,
    /// Wall-clock time (UTC) the decision was made.
    pub timestamp: DateTime<Utc>,
}

impl DecisionRecord {
    /// Build a record stamped with the current time.
    pub fn new(
        subject: SubjectId,
        action: Action,
        resource_ref: String,
        decision: Decision,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            subject,
            action,
            resource_ref,
            decision,
            timestamp: Utc::now(),
        }
    }
}
