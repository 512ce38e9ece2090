//! Variant-aware presentation resolution.
//!
//! Picks the Model -> ViewModel -> View -> Prefab chain for a runtime type and
//! a set of requested variants (platform, theme, density, ...):
//!
//! - `viewmap_types`: interned type model with inherited capabilities
//! - `viewmap_common`: variant algebra and scoring weights
//! - `viewmap_resolver`: scoring, staged resolution and solution caching
//!
//! This crate adds configuration loading and tracing setup on top.

pub use viewmap_common as common;
pub use viewmap_resolver as resolver;
pub use viewmap_types as types;

pub use viewmap_common::{
    AmbiguousVariantsError, ScoreWeights, Variant, VariantGroup, VariantSet, WeightsError,
};
pub use viewmap_resolver::{
    CacheStats, CachingResolver, InvalidEntry, InvalidManifestError, Manifest, ManifestBuilder,
    ManifestList, MappingManifest, PrefabMapping, PrefabRef, Problem, Resolve, ResolveError,
    Resolver, ScoreEvaluator, Solution, SolutionId, SolutionSet, Stage, TypeMapping,
    validate_manifest,
};
pub use viewmap_types::{TypeCapabilities, TypeDecl, TypeId, TypeTable, TypeTableError};

pub mod config;
pub use config::{CacheConfig, ResolverConfig, build_resolver};

pub mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};
