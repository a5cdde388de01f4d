//! Special-cased actions: decision logic too asymmetric for a flat rule.
//!
//! Each handler owns its action's decision end-to-end — it never falls
//! back into the generic role/state/hierarchy pipeline. The set of
//! special-cased actions is a load-time constant; membership is what the
//! engine dispatches on after the finalized-process override.
//!
//! Both handlers evaluate the subject's *active* role and unit, not the
//! full assignment set: these decisions hinge on the capacity the subject
//! is currently acting in.

use custos_contracts::{
    action::Action,
    decision::{Decision, DenyCause},
    resource::{Resource, SubprocessState},
    subject::{Role, Subject},
};

use crate::hierarchy::HierarchyResolver;

use SubprocessState::*;

/// States in which an administrator may verify map impact: everything from
/// registry homologation onward.
const IMPACT_ADMIN_STATES: &[SubprocessState] = &[
    RegistryHomologated,
    MapCreated,
    MapAvailable,
    MapValidated,
    MapHomologated,
];

/// States in which a unit head may verify impact: before the registry
/// leaves the unit.
const IMPACT_UNIT_HEAD_STATES: &[SubprocessState] = &[NotStarted, RegistryInProgress];

/// States whose registry content is complete enough to consult for
/// import: registry finished and everything after.
const IMPORT_ELIGIBLE_STATES: &[SubprocessState] = &[
    RegistryFinished,
    RegistryAvailable,
    RegistryHomologated,
    MapCreated,
    MapAvailable,
    MapValidated,
    MapHomologated,
];

/// True if `action` is owned by a special-case handler.
pub fn is_special(action: Action) -> bool {
    matches!(action, Action::VerifyImpact | Action::ConsultForImport)
}

/// Decide a special-cased action.
///
/// Callers must only pass actions for which [`is_special`] is true; the
/// generic pipeline never reaches this function otherwise.
pub(crate) fn decide(
    action: Action,
    subject: &Subject,
    resource: &Resource,
    hierarchy: &HierarchyResolver<'_>,
) -> Decision {
    match action {
        Action::VerifyImpact => verify_impact(subject, resource),
        Action::ConsultForImport => consult_for_import(subject, resource, hierarchy),
        other => Decision::deny(
            DenyCause::SpecialCase,
            format!("'{}' has no special-case handler", other.description()),
        ),
    }
}

fn states_label(states: &[SubprocessState]) -> String {
    states
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Impact verification: who may assess a map's impact depends on where
/// the subprocess sits in its lifecycle, asymmetrically per role.
fn verify_impact(subject: &Subject, resource: &Resource) -> Decision {
    let Some(state) = resource.subprocess_state() else {
        return Decision::deny(
            DenyCause::SpecialCase,
            "verify map impact applies to subprocesses only",
        );
    };

    match subject.active_role {
        Role::Admin => {
            if IMPACT_ADMIN_STATES.contains(&state) {
                Decision::Allow
            } else {
                Decision::deny(
                    DenyCause::SpecialCase,
                    format!(
                        "an administrator may verify map impact only when the subprocess is in: {}; it is currently '{}'",
                        states_label(IMPACT_ADMIN_STATES),
                        state
                    ),
                )
            }
        }

        Role::Manager => {
            // Exactly the map-available state, and strictly the owning
            // unit — the registry-available state never qualifies here.
            if state == MapAvailable && subject.active_unit == *resource.owning_unit() {
                Decision::Allow
            } else {
                Decision::deny(
                    DenyCause::SpecialCase,
                    format!(
                        "a manager may verify map impact only when the subprocess is in 'map available' and belongs to the manager's unit; it is currently '{}' in unit {}",
                        state,
                        resource.owning_unit()
                    ),
                )
            }
        }

        Role::UnitHead => {
            // Direct unit equality only — no hierarchy traversal.
            if IMPACT_UNIT_HEAD_STATES.contains(&state)
                && subject.active_unit == *resource.owning_unit()
            {
                Decision::Allow
            } else {
                Decision::deny(
                    DenyCause::SpecialCase,
                    format!(
                        "a unit head may verify map impact only when the subprocess is in: {} and belongs to their own unit; it is currently '{}' in unit {}",
                        states_label(IMPACT_UNIT_HEAD_STATES),
                        state,
                        resource.owning_unit()
                    ),
                )
            }
        }

        Role::Staff => Decision::deny(
            DenyCause::SpecialCase,
            "no subprocess state permits staff to verify map impact",
        ),
    }
}

/// Consultation for import: reading another unit's finished registry to
/// seed a new one. Administrators see everything; managers and unit heads
/// see their own subtree.
fn consult_for_import(
    subject: &Subject,
    resource: &Resource,
    hierarchy: &HierarchyResolver<'_>,
) -> Decision {
    let Some(state) = resource.subprocess_state() else {
        return Decision::deny(
            DenyCause::SpecialCase,
            "consult registry for import applies to subprocesses only",
        );
    };

    if !IMPORT_ELIGIBLE_STATES.contains(&state) {
        return Decision::deny(
            DenyCause::SpecialCase,
            format!(
                "a registry can be consulted for import only once finished; the subprocess is currently '{}'",
                state
            ),
        );
    }

    match subject.active_role {
        Role::Admin => Decision::Allow,
        Role::Manager | Role::UnitHead => {
            if hierarchy.is_same_or_descendant(resource.owning_unit(), &subject.active_unit) {
                Decision::Allow
            } else {
                Decision::deny(
                    DenyCause::SpecialCase,
                    format!(
                        "registries may be consulted only within the subject's own unit or a subordinate unit; the subprocess belongs to unit {}",
                        resource.owning_unit()
                    ),
                )
            }
        }
        Role::Staff => Decision::deny(
            DenyCause::SpecialCase,
            "staff may not consult registries for import",
        ),
    }
}
