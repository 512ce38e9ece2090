//! Candidate scoring.
//!
//! Two independent scores decide between candidate mappings:
//!
//! - **Type score**: how close the candidate's source type is to the requested
//!   type. Classes are matched along the class chain; interfaces by
//!   breadth-first search over the interface graph, so that the shortest path
//!   through a diamond wins.
//! - **Variant score**: how well the candidate's explicit and implicit variants
//!   agree with the requested variants. An explicit tag that contradicts the
//!   request vetoes the candidate.
//!
//! `None` means "not a candidate". The evaluator holds only its weights.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::collections::VecDeque;
use viewmap_common::{ScoreWeights, Variant, VariantSet};
use viewmap_types::{TypeId, TypeTable};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreEvaluator {
    weights: ScoreWeights,
}

impl ScoreEvaluator {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score `candidate` as a stand-in for `requested`.
    ///
    /// Returns `None` when `requested` is neither `candidate` nor derived from
    /// or implementing it.
    pub fn type_score(
        &self,
        types: &TypeTable,
        candidate: TypeId,
        requested: TypeId,
    ) -> Option<i32> {
        let w = &self.weights;
        let node = types.get(candidate)?;
        if node.is_class() {
            let depth = types.class_chain(requested).position(|id| id == candidate)?;
            Some(
                w.base_type_score
                    .saturating_sub(scaled(depth, w.inheritance_depth_penalty)),
            )
        } else {
            let depth = interface_depth(types, candidate, requested)?;
            Some(
                w.base_type_score
                    .saturating_sub(w.interface_penalty)
                    .saturating_sub(scaled(depth, w.inheritance_depth_penalty)),
            )
        }
    }

    /// Score a candidate's variants against the requested ones.
    ///
    /// Each requested variant is judged on its own, first against the explicit
    /// tags, then against the implicit ones. Explicit tags never matched by a
    /// request cost `excess_variant_penalty` each. Sums saturate at the `i32`
    /// bounds.
    ///
    /// Only one fallback level is consulted.
    pub fn variant_score(
        &self,
        requested: &VariantSet,
        explicit: &VariantSet,
        implicit: &VariantSet,
    ) -> Option<i32> {
        let w = &self.weights;
        let mut excess: SmallVec<[&Variant; 4]> = explicit.iter().collect();
        let mut score = 0i32;

        for variant in requested {
            let fallback = variant.fallback();

            if explicit.contains(variant) {
                score = score.saturating_add(w.explicit_variant_score);
                excess.retain(|v| *v != variant);
            } else if let Some(fallback) = fallback.as_ref().filter(|f| explicit.contains(f)) {
                score = score.saturating_add(w.explicit_fallback_variant_score);
                excess.retain(|v| *v != fallback);
            } else if explicit.conflicting(variant).is_some() {
                return None;
            } else if implicit.contains(variant) {
                score = score.saturating_add(w.implicit_variant_score);
            } else if fallback.as_ref().is_some_and(|f| implicit.contains(f)) {
                score = score.saturating_add(w.implicit_fallback_variant_score);
            } else if implicit.conflicting(variant).is_some() {
                score = score.saturating_sub(w.incorrect_implicit_variant_penalty);
            } else {
                score = score.saturating_add(w.fallback_variant_score);
            }
        }

        Some(score.saturating_sub(scaled(excess.len(), w.excess_variant_penalty)))
    }

    /// Combined score of a type mapping candidate.
    ///
    /// The variant score is a veto: a candidate rejected on variants is never
    /// selectable, however close its type.
    pub fn mapping_score(
        &self,
        types: &TypeTable,
        source: TypeId,
        requested: TypeId,
        requested_variants: &VariantSet,
        explicit: &VariantSet,
        implicit: &VariantSet,
    ) -> Option<i32> {
        let variant = self.variant_score(requested_variants, explicit, implicit)?;
        let ty = self.type_score(types, source, requested)?;
        Some(ty.saturating_add(variant))
    }
}

fn scaled(count: usize, weight: i32) -> i32 {
    i32::try_from(count)
        .unwrap_or(i32::MAX)
        .saturating_mul(weight)
}

/// Depth at which `target` is first reached from `start`.
///
/// Depth 0 is `start` itself; each interface edge and each parent-class edge
/// adds one. Parents share the queue with interfaces, and the root object type
/// is never visited.
fn interface_depth(types: &TypeTable, target: TypeId, start: TypeId) -> Option<usize> {
    let mut visited: FxHashSet<TypeId> = FxHashSet::default();
    let mut queue: VecDeque<(TypeId, usize)> = VecDeque::new();
    visited.insert(start);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if current == target {
            return Some(depth);
        }
        let Some(node) = types.get(current) else {
            continue;
        };
        for &iface in node.interfaces() {
            if visited.insert(iface) {
                queue.push_back((iface, depth + 1));
            }
        }
        if let Some(parent) = node.parent() {
            if parent != TypeId::OBJECT && visited.insert(parent) {
                queue.push_back((parent, depth + 1));
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "../tests/evaluator_tests.rs"]
mod tests;
