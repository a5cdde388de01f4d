//! # custos-engine
//!
//! The CUSTOS policy engine: a static rule table, organizational-hierarchy
//! resolution, custody-aware location resolution, and the special-case
//! handlers, combined into one deterministic decision pipeline.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use custos_engine::PolicyEngine;
//!
//! let engine = PolicyEngine::new(units, transitions);
//! // Pass `engine` to `custos_core::AccessGate::new(...)`.
//! ```
//!
//! ## Evaluation order
//!
//! Finalized-process override, special-case dispatch, rule lookup, role
//! check, state check, hierarchy check. See [`engine::PolicyEngine`].

pub mod engine;
pub mod hierarchy;
pub mod location;
pub mod rules;
pub mod special;

pub use engine::PolicyEngine;
pub use hierarchy::HierarchyResolver;
pub use location::LocationResolver;
pub use rules::{Rule, RuleTable, StateSet};

// ── Tests ─────────────────────────────────────────────────────────────────────
