//! Variant algebra.
//!
//! A variant is a named tag inside an exclusive category (its group), e.g.
//! `Fast` in `Speed`. Two variants conflict when they share a group but not a
//! name. The group owns the fallback table: each variant name may degrade to
//! one more general variant of the same group, and only that single level is
//! consulted when scoring.
//!
//! `VariantSet` keeps its members sorted by `(group, name)` so that equality
//! and hashing ignore insertion order, which lets sets take part in cache keys.

use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// VariantGroup
// =============================================================================

/// An exclusive category of variants (platform, theme, density, ...).
///
/// Identity covers the name and the fallback table, so two groups sharing a
/// name but declaring different fallbacks are distinct groups.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantGroup(Arc<GroupDef>);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct GroupDef {
    name: Arc<str>,
    /// `(variant, fallback)`, sorted by variant name.
    fallbacks: SmallVec<[(Arc<str>, Arc<str>); 2]>,
}

impl VariantGroup {
    pub fn new(name: &str) -> Self {
        Self(Arc::new(GroupDef {
            name: Arc::from(name),
            fallbacks: SmallVec::new(),
        }))
    }

    /// Declare that `variant` degrades to `fallback`.
    ///
    /// Declaring the same variant twice keeps the last fallback. A variant
    /// naming itself is ignored.
    pub fn with_fallback(mut self, variant: &str, fallback: &str) -> Self {
        if variant == fallback {
            return self;
        }
        let def = Arc::make_mut(&mut self.0);
        match def
            .fallbacks
            .binary_search_by(|(name, _)| (**name).cmp(variant))
        {
            Ok(index) => def.fallbacks[index].1 = Arc::from(fallback),
            Err(index) => def
                .fallbacks
                .insert(index, (Arc::from(variant), Arc::from(fallback))),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The fallback declared for `variant`, if any.
    pub fn fallback_of(&self, variant: &str) -> Option<&str> {
        let fallbacks = &self.0.fallbacks;
        fallbacks
            .binary_search_by(|(name, _)| (**name).cmp(variant))
            .ok()
            .map(|index| &*fallbacks[index].1)
    }

    /// Create a variant of this group.
    pub fn variant(&self, name: &str) -> Variant {
        Variant {
            group: self.clone(),
            name: Arc::from(name),
        }
    }
}

impl fmt::Display for VariantGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for VariantGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A single tag within a `VariantGroup`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variant {
    group: VariantGroup,
    name: Arc<str>,
}

impl Variant {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &VariantGroup {
        &self.group
    }

    /// The more general variant this one degrades to, per its group.
    pub fn fallback(&self) -> Option<Variant> {
        self.group
            .fallback_of(&self.name)
            .map(|name| self.group.variant(name))
    }

    /// Same group, different name.
    pub fn conflicts_with(&self, other: &Variant) -> bool {
        self.group == other.group && self.name != other.name
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

// =============================================================================
// VariantSet
// =============================================================================

/// An immutable set of variants.
///
/// Collecting through `FromIterator` does not check group exclusivity; use
/// [`VariantSet::exclusive`] at API boundaries where a set must hold at most
/// one variant per group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VariantSet(SmallVec<[Variant; 4]>);

impl VariantSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set, rejecting two variants from the same group.
    pub fn exclusive<I>(variants: I) -> Result<Self, AmbiguousVariantsError>
    where
        I: IntoIterator<Item = Variant>,
    {
        let set: Self = variants.into_iter().collect();
        set.check_exclusive()?;
        Ok(set)
    }

    /// Fail if two members share a group.
    pub fn check_exclusive(&self) -> Result<(), AmbiguousVariantsError> {
        match self.first_conflict() {
            Some((first, second)) => Err(AmbiguousVariantsError {
                group: first.group.clone(),
                first: Arc::clone(&first.name),
                second: Arc::clone(&second.name),
            }),
            None => Ok(()),
        }
    }

    /// The first pair of members sharing a group.
    ///
    /// Members are sorted by group, so conflicting members are adjacent.
    pub fn first_conflict(&self) -> Option<(&Variant, &Variant)> {
        self.0
            .windows(2)
            .find(|pair| pair[0].group == pair[1].group)
            .map(|pair| (&pair[0], &pair[1]))
    }

    pub fn is_exclusive(&self) -> bool {
        self.first_conflict().is_none()
    }

    pub fn contains(&self, variant: &Variant) -> bool {
        self.0.binary_search(variant).is_ok()
    }

    /// The member belonging to `group`, if any.
    pub fn in_group(&self, group: &VariantGroup) -> Option<&Variant> {
        self.0.iter().find(|v| &v.group == group)
    }

    /// A member that conflicts with `variant`.
    pub fn conflicting(&self, variant: &Variant) -> Option<&Variant> {
        self.0.iter().find(|v| v.conflicts_with(variant))
    }

    pub fn union(&self, other: &VariantSet) -> VariantSet {
        self.0.iter().chain(other.0.iter()).cloned().collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variant> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Variant> for VariantSet {
    fn from_iter<I: IntoIterator<Item = Variant>>(iter: I) -> Self {
        let mut members: SmallVec<[Variant; 4]> = iter.into_iter().collect();
        members.sort();
        members.dedup();
        Self(members)
    }
}

impl<'a> IntoIterator for &'a VariantSet {
    type Item = &'a Variant;
    type IntoIter = std::slice::Iter<'a, Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for VariantSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(ToString::to_string))
    }
}

impl fmt::Display for VariantSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, variant) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{variant}")?;
        }
        f.write_str("}")
    }
}

// =============================================================================
// Errors
// =============================================================================

/// A variant request named two variants of the same group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmbiguousVariantsError {
    pub group: VariantGroup,
    pub first: Arc<str>,
    pub second: Arc<str>,
}

impl fmt::Display for AmbiguousVariantsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ambiguous variant request: group `{}` has both `{}` and `{}`",
            self.group, self.first, self.second
        )
    }
}

impl std::error::Error for AmbiguousVariantsError {}

#[cfg(test)]
#[path = "../tests/variant_tests.rs"]
mod tests;
