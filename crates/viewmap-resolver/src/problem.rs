//! Resolver input and output.

use crate::mapping::PrefabRef;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use viewmap_common::{AmbiguousVariantsError, VariantSet};
use viewmap_types::TypeId;

static NEXT_SOLUTION_ID: AtomicU64 = AtomicU64::new(1);

/// What to resolve: a type (or nothing) under a set of requested variants.
///
/// Equality is by type id and variant set; variant order does not matter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Problem {
    ty: Option<TypeId>,
    variants: VariantSet,
}

impl Problem {
    /// Build a problem, rejecting requests that name two variants of one group.
    pub fn new(
        ty: impl Into<Option<TypeId>>,
        variants: VariantSet,
    ) -> Result<Self, AmbiguousVariantsError> {
        variants.check_exclusive()?;
        Ok(Self {
            ty: ty.into(),
            variants,
        })
    }

    /// A problem with no variant preferences.
    pub fn plain(ty: TypeId) -> Self {
        Self {
            ty: Some(ty),
            variants: VariantSet::empty(),
        }
    }

    pub fn ty(&self) -> Option<TypeId> {
        self.ty
    }

    pub fn variants(&self) -> &VariantSet {
        &self.variants
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            Some(ty) => write!(f, "{ty} {}", self.variants),
            None => write!(f, "<none> {}", self.variants),
        }
    }
}

/// Process-unique identifier of a produced solution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SolutionId(pub u64);

impl SolutionId {
    fn next() -> Self {
        Self(NEXT_SOLUTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A fully resolved presentation chain.
///
/// `model` is `None` when resolution started from a ViewModel rather than a
/// Model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub id: SolutionId,
    pub model: Option<TypeId>,
    pub view_model: TypeId,
    pub view: TypeId,
    pub prefab: PrefabRef,
    pub prefab_variants: VariantSet,
}

impl Solution {
    pub(crate) fn new(
        model: Option<TypeId>,
        view_model: TypeId,
        view: TypeId,
        prefab: PrefabRef,
        prefab_variants: VariantSet,
    ) -> Self {
        Self {
            id: SolutionId::next(),
            model,
            view_model,
            view,
            prefab,
            prefab_variants,
        }
    }

    /// Same chain, ignoring the solution id.
    pub fn same_resolution(&self, other: &Solution) -> bool {
        self.model == other.model
            && self.view_model == other.view_model
            && self.view == other.view
            && self.prefab == other.prefab
            && self.prefab_variants == other.prefab_variants
    }
}
