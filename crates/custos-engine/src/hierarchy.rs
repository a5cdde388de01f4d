//! Structural questions over the organizational unit forest.
//!
//! All operations are pure and total over the snapshot a `UnitDirectory`
//! exposes. Hierarchy absence is a normal negative result, never an
//! error: if an ancestor chain cannot be resolved, the units are simply
//! "not related".

use custos_contracts::{
    subject::Subject,
    unit::UnitId,
};
use custos_core::traits::UnitDirectory;

/// Upper bound on ancestor-chain walks.
///
/// A well-formed directory is a forest and never comes close; the bound
/// turns a parent cycle in a corrupt snapshot into a negative answer
/// instead of a hang.
const MAX_ANCESTOR_DEPTH: usize = 64;

/// Answers structural questions over a unit directory snapshot.
pub struct HierarchyResolver<'a> {
    directory: &'a dyn UnitDirectory,
}

impl<'a> HierarchyResolver<'a> {
    pub fn new(directory: &'a dyn UnitDirectory) -> Self {
        Self { directory }
    }

    /// True if `candidate` sits strictly below `ancestor` in the forest.
    ///
    /// Walks `candidate`'s parent chain upward until `ancestor` is found
    /// or the chain ends. A unit is never its own descendant by this
    /// primitive, which guards against false positives when the ancestor
    /// chain is absent from the snapshot.
    pub fn is_descendant(&self, candidate: &UnitId, ancestor: &UnitId) -> bool {
        let mut current = match self.directory.unit(candidate) {
            Some(unit) => unit.parent,
            None => return false,
        };

        for _ in 0..MAX_ANCESTOR_DEPTH {
            match current {
                Some(id) if id == *ancestor => return true,
                Some(id) => {
                    current = self.directory.unit(&id).and_then(|u| u.parent);
                }
                None => return false,
            }
        }

        false
    }

    /// True if `a` is `b` itself (by id) or one of `b`'s descendants.
    pub fn is_same_or_descendant(&self, a: &UnitId, b: &UnitId) -> bool {
        a == b || self.is_descendant(a, b)
    }

    /// True iff `alleged_parent` is the immediate parent of `child`.
    pub fn is_immediate_parent(&self, child: &UnitId, alleged_parent: &UnitId) -> bool {
        match self.directory.unit(child) {
            Some(unit) => unit.parent.as_ref() == Some(alleged_parent),
            None => false,
        }
    }

    /// True iff `subject` is the responsible person of `unit`.
    pub fn is_unit_responsible(&self, unit: &UnitId, subject: &Subject) -> bool {
        match self.directory.unit(unit) {
            Some(unit) => unit.responsible == subject.id,
            None => false,
        }
    }
}
