//! Mapping records: the edges of the resolution graph.
//!
//! Each mapping carries the variants it was authored for plus the implicit
//! variants propagated onto it from downstream mappings when the manifest was
//! built. Mappings are immutable once handed to a manifest.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use viewmap_common::VariantSet;
use viewmap_types::TypeId;

/// Opaque reference to a renderable asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PrefabRef(Arc<str>);

impl PrefabRef {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PrefabRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Model -> ViewModel or ViewModel -> View edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMapping {
    pub source: TypeId,
    pub target: TypeId,
    pub variants: VariantSet,
    pub implicit_variants: VariantSet,
}

impl TypeMapping {
    pub fn new(source: TypeId, target: TypeId) -> Self {
        Self {
            source,
            target,
            variants: VariantSet::empty(),
            implicit_variants: VariantSet::empty(),
        }
    }

    pub fn with_variants(mut self, variants: VariantSet) -> Self {
        self.variants = variants;
        self
    }

    pub fn with_implicit_variants(mut self, variants: VariantSet) -> Self {
        self.implicit_variants = variants;
        self
    }
}

/// A View -> Prefab edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefabMapping {
    pub view: TypeId,
    pub prefab: PrefabRef,
    pub variants: VariantSet,
    pub implicit_variants: VariantSet,
}

impl PrefabMapping {
    pub fn new(view: TypeId, prefab: PrefabRef) -> Self {
        Self {
            view,
            prefab,
            variants: VariantSet::empty(),
            implicit_variants: VariantSet::empty(),
        }
    }

    pub fn with_variants(mut self, variants: VariantSet) -> Self {
        self.variants = variants;
        self
    }

    pub fn with_implicit_variants(mut self, variants: VariantSet) -> Self {
        self.implicit_variants = variants;
        self
    }
}
