//! Resolver error types.

use std::fmt;
use viewmap_common::{AmbiguousVariantsError, VariantSet};
use viewmap_types::TypeId;

// =============================================================================
// Stages
// =============================================================================

/// One step of the resolution chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    ModelToViewModel,
    ViewModelToView,
    ViewToPrefab,
}

impl Stage {
    pub const fn source_kind(self) -> &'static str {
        match self {
            Self::ModelToViewModel => "Model",
            Self::ViewModelToView => "ViewModel",
            Self::ViewToPrefab => "View",
        }
    }

    pub const fn target_kind(self) -> &'static str {
        match self {
            Self::ModelToViewModel => "ViewModel",
            Self::ViewModelToView => "View",
            Self::ViewToPrefab => "Prefab",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source_kind(), self.target_kind())
    }
}

// =============================================================================
// ResolveError
// =============================================================================

/// Resolution failed for a problem.
///
/// Recoverable by the caller (e.g. by rendering a fallback view). Failed
/// resolutions are never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// No candidate mapping survived filtering and scoring at `stage`.
    NoCandidate {
        stage: Stage,
        ty: TypeId,
        type_name: String,
        variants: VariantSet,
    },
    /// A cached solution no longer forms a chain of the current manifest;
    /// `ty` is the first type whose link is missing.
    Stale { ty: TypeId },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandidate {
                stage,
                type_name,
                variants,
                ..
            } => write!(
                f,
                "no {} mapping found for {} `{}` with variants {}",
                stage.target_kind(),
                stage.source_kind(),
                type_name,
                variants
            ),
            Self::Stale { ty } => {
                write!(f, "cached solution is stale: type {ty} is no longer mapped")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

// =============================================================================
// InvalidManifestError
// =============================================================================

/// The three mapping lists of a manifest.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ManifestList {
    ModelsToViewModels,
    ViewModelsToViews,
    ViewsToPrefabs,
}

impl fmt::Display for ManifestList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ModelsToViewModels => "models_to_view_models",
            Self::ViewModelsToViews => "view_models_to_views",
            Self::ViewsToPrefabs => "views_to_prefabs",
        })
    }
}

/// What is wrong with a manifest entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidEntry {
    /// The id is not interned in the manifest's type table.
    UnresolvedType(TypeId),
    /// The root object sentinel cannot take part in a mapping.
    RootObject,
    EmptyPrefab,
    AmbiguousVariants(AmbiguousVariantsError),
}

impl fmt::Display for InvalidEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedType(ty) => write!(f, "type {ty} did not resolve"),
            Self::RootObject => f.write_str("the root object type cannot be mapped"),
            Self::EmptyPrefab => f.write_str("prefab reference is empty"),
            Self::AmbiguousVariants(err) => write!(f, "{err}"),
        }
    }
}

/// The manifest is structurally malformed; the resolver cannot be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidManifestError {
    pub list: ManifestList,
    pub index: usize,
    pub reason: InvalidEntry,
}

impl fmt::Display for InvalidManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid manifest entry {}[{}]: {}",
            self.list, self.index, self.reason
        )
    }
}

impl std::error::Error for InvalidManifestError {}
