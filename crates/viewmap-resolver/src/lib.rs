//! Presentation resolution engine.
//!
//! Given a runtime type and a requested set of variants, picks the single best
//! Model -> ViewModel -> View -> Prefab chain from a [`Manifest`] of candidate
//! mappings:
//!
//! - **`ScoreEvaluator`**: pure type-distance and variant-affinity scoring
//! - **`Resolver`**: three-stage candidate search over the manifest
//! - **`CachingResolver`**: memoization over a shared [`SolutionSet`]
//!
//! Resolution is synchronous in-memory computation. `Resolver` holds no mutable
//! state after construction; the solution cache is the only shared mutable
//! resource and is safe to use from many threads.
mod caches;
mod caching;
mod error;
mod evaluator;
mod manifest;
mod mapping;
mod problem;
mod resolver;

pub use caching::{CacheStats, CachingResolver, SolutionSet};
pub use error::{InvalidEntry, InvalidManifestError, ManifestList, ResolveError, Stage};
pub use evaluator::ScoreEvaluator;
pub use manifest::{Manifest, ManifestBuilder, MappingManifest, validate_manifest};
pub use mapping::{PrefabMapping, PrefabRef, TypeMapping};
pub use problem::{Problem, Solution, SolutionId};
pub use resolver::{Resolve, Resolver};

pub use viewmap_common::{ScoreWeights, Variant, VariantGroup, VariantSet};
pub use viewmap_types::{TypeCapabilities, TypeDecl, TypeId, TypeTable};

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;
