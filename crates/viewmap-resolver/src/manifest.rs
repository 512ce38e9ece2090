//! Manifest access and validation.
//!
//! The manifest is built elsewhere (editor-time scanning, persistence); the
//! resolver only reads it. List order is significant: when two candidates
//! score the same, the one registered first wins.

use crate::error::{InvalidEntry, InvalidManifestError, ManifestList};
use crate::mapping::{PrefabMapping, TypeMapping};
use std::sync::Arc;
use viewmap_common::VariantSet;
use viewmap_types::{TypeId, TypeTable};

/// Read-only view of the three mapping lists and the type table they refer to.
pub trait Manifest: Send + Sync {
    fn types(&self) -> &TypeTable;
    fn models_to_view_models(&self) -> &[TypeMapping];
    fn view_models_to_views(&self) -> &[TypeMapping];
    fn views_to_prefabs(&self) -> &[PrefabMapping];
}

/// In-memory manifest.
#[derive(Clone, Debug)]
pub struct MappingManifest {
    types: Arc<TypeTable>,
    models_to_view_models: Vec<TypeMapping>,
    view_models_to_views: Vec<TypeMapping>,
    views_to_prefabs: Vec<PrefabMapping>,
}

impl MappingManifest {
    pub fn new(
        types: Arc<TypeTable>,
        models_to_view_models: Vec<TypeMapping>,
        view_models_to_views: Vec<TypeMapping>,
        views_to_prefabs: Vec<PrefabMapping>,
    ) -> Self {
        Self {
            types,
            models_to_view_models,
            view_models_to_views,
            views_to_prefabs,
        }
    }

    pub fn builder(types: Arc<TypeTable>) -> ManifestBuilder {
        ManifestBuilder::new(types)
    }
}

impl Manifest for MappingManifest {
    fn types(&self) -> &TypeTable {
        &self.types
    }

    fn models_to_view_models(&self) -> &[TypeMapping] {
        &self.models_to_view_models
    }

    fn view_models_to_views(&self) -> &[TypeMapping] {
        &self.view_models_to_views
    }

    fn views_to_prefabs(&self) -> &[PrefabMapping] {
        &self.views_to_prefabs
    }
}

/// Appends mappings in registration order.
#[derive(Debug)]
pub struct ManifestBuilder {
    manifest: MappingManifest,
}

impl ManifestBuilder {
    pub fn new(types: Arc<TypeTable>) -> Self {
        Self {
            manifest: MappingManifest::new(types, Vec::new(), Vec::new(), Vec::new()),
        }
    }

    pub fn model_to_view_model(mut self, mapping: TypeMapping) -> Self {
        self.manifest.models_to_view_models.push(mapping);
        self
    }

    pub fn view_model_to_view(mut self, mapping: TypeMapping) -> Self {
        self.manifest.view_models_to_views.push(mapping);
        self
    }

    pub fn view_to_prefab(mut self, mapping: PrefabMapping) -> Self {
        self.manifest.views_to_prefabs.push(mapping);
        self
    }

    pub fn build(self) -> MappingManifest {
        self.manifest
    }
}

/// Check every entry of `manifest` once, before any resolution runs.
pub fn validate_manifest<M: Manifest + ?Sized>(manifest: &M) -> Result<(), InvalidManifestError> {
    let types = manifest.types();

    let type_lists = [
        (
            ManifestList::ModelsToViewModels,
            manifest.models_to_view_models(),
        ),
        (
            ManifestList::ViewModelsToViews,
            manifest.view_models_to_views(),
        ),
    ];
    for (list, mappings) in type_lists {
        for (index, mapping) in mappings.iter().enumerate() {
            let fail = |reason| InvalidManifestError {
                list,
                index,
                reason,
            };
            check_type(types, mapping.source).map_err(fail)?;
            check_type(types, mapping.target).map_err(fail)?;
            check_variants(&mapping.variants).map_err(fail)?;
        }
    }

    for (index, mapping) in manifest.views_to_prefabs().iter().enumerate() {
        let fail = |reason| InvalidManifestError {
            list: ManifestList::ViewsToPrefabs,
            index,
            reason,
        };
        check_type(types, mapping.view).map_err(fail)?;
        if mapping.prefab.is_empty() {
            return Err(fail(InvalidEntry::EmptyPrefab));
        }
        check_variants(&mapping.variants).map_err(fail)?;
    }

    Ok(())
}

fn check_type(types: &TypeTable, ty: TypeId) -> Result<(), InvalidEntry> {
    if ty == TypeId::OBJECT {
        Err(InvalidEntry::RootObject)
    } else if !types.contains(ty) {
        Err(InvalidEntry::UnresolvedType(ty))
    } else {
        Ok(())
    }
}

fn check_variants(variants: &VariantSet) -> Result<(), InvalidEntry> {
    variants
        .check_exclusive()
        .map_err(InvalidEntry::AmbiguousVariants)
}

#[cfg(test)]
#[path = "../tests/manifest_tests.rs"]
mod tests;
