//! Resolver configuration.
//!
//! ```json
//! {
//!   "weights": { "explicitVariantScore": 120, "excessVariantPenalty": 25 },
//!   "cache": { "enabled": true }
//! }
//! ```
//!
//! Every field is optional; missing weights keep their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use viewmap_resolver::{
    CachingResolver, Manifest, Resolve, Resolver, ScoreEvaluator, ScoreWeights, SolutionSet,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    pub weights: ScoreWeights,
    pub cache: CacheConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Memoize solutions in the shared `SolutionSet`.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ResolverConfig {
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(source).context("failed to parse resolver config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read resolver config: {}", path.display()))?;
        Self::from_json_str(&source)
            .with_context(|| format!("failed to load resolver config: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.weights
            .validate()
            .context("invalid score weights")
    }
}

/// Build the resolver described by `config` over `manifest`.
///
/// With caching enabled the resolver stores solutions in `solutions`, which
/// the caller may share with other resolvers and clear after a manifest
/// rebuild.
pub fn build_resolver<M: Manifest + 'static>(
    config: &ResolverConfig,
    manifest: Arc<M>,
    solutions: Arc<SolutionSet>,
) -> Result<Box<dyn Resolve>> {
    config.validate()?;
    let resolver = Resolver::new(manifest, ScoreEvaluator::new(config.weights))
        .context("failed to build resolver")?;

    debug!(cache = config.cache.enabled, "build_resolver");
    if config.cache.enabled {
        Ok(Box::new(CachingResolver::new(resolver, solutions)))
    } else {
        Ok(Box::new(resolver))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
