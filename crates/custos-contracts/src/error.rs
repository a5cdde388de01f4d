//! Error taxonomy for the CUSTOS engine.
//!
//! Denials are not errors: `decide` returns `Decision::Deny` as a normal
//! value and never fails for business reasons. The variants here cover the
//! narrow set of genuinely exceptional conditions.

use thiserror::Error;

/// The unified error type for the CUSTOS crates.
#[derive(Debug, Error)]
pub enum CustosError {
    /// No rule exists for an action that is not special-cased either.
    ///
    /// This is a configuration defect — the rule table is incomplete
    /// relative to the action vocabulary — and is logged at error level by
    /// the engine so operators can detect missing rules during rollout.
    #[error("no authorization rule configured for action '{action}'")]
    UnknownAction { action: String },

    /// Raised by `enforce` when the decision is a deny.
    ///
    /// Carries the structured deny reason; never a stack trace.
    #[error("access denied: {reason}")]
    AccessDenied { reason: String },

    /// The audit sink could not persist a decision record.
    ///
    /// This is fatal for the call — a decision that cannot be audited is
    /// not returned to the caller.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// A resource or unit reference could not be resolved by the caller
    /// while assembling a snapshot.
    ///
    /// The engine itself never raises this: unresolved hierarchy data is a
    /// negative structural fact inside the engine, not an exception.
    #[error("could not resolve reference '{reference}'")]
    ResolutionFailure { reference: String },
}

/// Convenience alias used throughout the CUSTOS crates.
pub type CustosResult<T> = Result<T, CustosError>;
