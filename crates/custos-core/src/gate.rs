//! The access-control facade: the single entry point callers use.
//!
//! `AccessGate` wires a `DecisionPolicy` to an `AuditSink` and guarantees
//! the audit invariant: every call to `decide` or `enforce` appends exactly
//! one decision record, whose outcome matches what the caller receives —
//! including on special-case paths, which flow through the same pipeline.

use tracing::{debug, warn};

use custos_contracts::{
    action::Action,
    decision::{Decision, DecisionRecord},
    error::{CustosError, CustosResult},
    resource::Resource,
    rule::RuleExplanation,
    subject::Subject,
};

use crate::traits::{AuditSink, DecisionPolicy};

/// The facade through which all authorization checks run.
///
/// Construct one per deployment (or per request scope, when the policy
/// holds request-scoped caches) and share it freely — both components are
/// `Send + Sync`.
pub struct AccessGate {
    policy: Box<dyn DecisionPolicy>,
    audit: Box<dyn AuditSink>,
}

impl AccessGate {
    pub fn new(policy: Box<dyn DecisionPolicy>, audit: Box<dyn AuditSink>) -> Self {
        Self { policy, audit }
    }

    /// Decide whether `subject` may perform `action` on `resource`.
    ///
    /// Denials are returned, not raised — `decide` never errs for business
    /// reasons. The only failure mode is a failed audit append, which is
    /// fatal: a decision that cannot be audited is not returned.
    pub fn decide(
        &self,
        subject: &Subject,
        action: Action,
        resource: &Resource,
    ) -> CustosResult<Decision> {
        debug!(
            subject = %subject.id,
            action = %action,
            resource = %resource.reference(),
            "deciding"
        );

        let decision = self.policy.evaluate(subject, action, resource);

        if let Decision::Deny { reason, .. } = &decision {
            warn!(
                subject = %subject.id,
                action = %action,
                resource = %resource.reference(),
                reason = %reason,
                "access denied"
            );
        }

        let record = DecisionRecord::new(
            subject.id.clone(),
            action,
            resource.reference(),
            decision.clone(),
        );
        self.audit.append(&record)?;

        Ok(decision)
    }

    /// Like `decide`, but raises `CustosError::AccessDenied` on a deny.
    ///
    /// Audits exactly once — the append happens inside `decide`, never a
    /// second time here.
    pub fn enforce(
        &self,
        subject: &Subject,
        action: Action,
        resource: &Resource,
    ) -> CustosResult<()> {
        match self.decide(subject, action, resource)? {
            Decision::Allow => Ok(()),
            Decision::Deny { reason, .. } => Err(CustosError::AccessDenied { reason }),
        }
    }

    /// What the rule table requires for `action`; see
    /// [`DecisionPolicy::explain`].
    pub fn explain(&self, action: Action) -> Option<RuleExplanation> {
        self.policy.explain(action)
    }
}
