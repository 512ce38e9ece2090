//! Memoizing resolver.
//!
//! `CachingResolver` keeps solutions in a [`SolutionSet`] owned by the caller,
//! so several resolvers (e.g. one per manifest generation) can share one set.
//! The set is unbounded and never invalidated automatically; callers clear it
//! after rebuilding a manifest. Failures are never stored, and every hit is
//! revalidated against the inner resolver's manifest before it is returned.

use crate::caches::query_trace;
use crate::error::ResolveError;
use crate::problem::{Problem, Solution};
use crate::resolver::Resolve;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;
use viewmap_types::TypeId;

// =============================================================================
// SolutionSet
// =============================================================================

/// Thread-safe `Problem -> Solution` map.
#[derive(Debug, Default)]
pub struct SolutionSet {
    solutions: DashMap<Problem, Arc<Solution>>,
}

impl SolutionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set ready to be shared between resolvers.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn get(&self, problem: &Problem) -> Option<Arc<Solution>> {
        self.solutions.get(problem).map(|entry| Arc::clone(entry.value()))
    }

    /// Store `solution` unless another caller got there first, and return the
    /// stored one.
    pub fn insert(&self, problem: Problem, solution: Arc<Solution>) -> Arc<Solution> {
        let entry = self.solutions.entry(problem).or_insert(solution);
        Arc::clone(entry.value())
    }

    /// Drop the cached solution for `problem`.
    pub fn invalidate(&self, problem: &Problem) -> Option<Arc<Solution>> {
        self.solutions.remove(problem).map(|(_, solution)| solution)
    }

    pub fn clear(&self) {
        self.solutions.clear();
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

// =============================================================================
// CachingResolver
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Decorator that memoizes an inner resolver.
pub struct CachingResolver<R: Resolve> {
    inner: R,
    solutions: Arc<SolutionSet>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<R: Resolve> CachingResolver<R> {
    pub fn new(inner: R, solutions: Arc<SolutionSet>) -> Self {
        Self {
            inner,
            solutions,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn solutions(&self) -> &Arc<SolutionSet> {
        &self.solutions
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn cached(&self, problem: &Problem) -> Result<Option<Arc<Solution>>, ResolveError> {
        let Some(solution) = self.solutions.get(problem) else {
            return Ok(None);
        };
        if let Err(err) = self.inner.revalidate(&solution) {
            trace!(problem = %problem, error = %err, "cached solution is stale");
            return Err(err);
        }
        Ok(Some(solution))
    }
}

impl<R: Resolve> Resolve for CachingResolver<R> {
    fn resolve(&self, problem: &Problem) -> Result<Option<Arc<Solution>>, ResolveError> {
        if problem.ty().is_none() {
            return self.inner.resolve(problem);
        }

        let query_id = query_trace::enabled().then(query_trace::next_query_id);
        if let Some(query_id) = query_id {
            query_trace::resolve_start(query_id, "cached_resolve", problem.ty(), problem.variants());
        }

        if let Some(solution) = self.cached(problem)? {
            self.hits.fetch_add(1, Ordering::Relaxed);
            if let Some(query_id) = query_id {
                query_trace::resolve_end(query_id, "cached_resolve", "solved", true);
            }
            return Ok(Some(solution));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = self.inner.resolve(problem);
        if let Some(query_id) = query_id {
            let outcome = if result.is_ok() { "solved" } else { "failed" };
            query_trace::resolve_end(query_id, "cached_resolve", outcome, false);
        }

        Ok(result?.map(|solution| self.solutions.insert(problem.clone(), solution)))
    }

    fn is_resolvable(&self, ty: TypeId) -> bool {
        self.inner.is_resolvable(ty)
    }

    fn revalidate(&self, solution: &Solution) -> Result<(), ResolveError> {
        self.inner.revalidate(solution)
    }
}

#[cfg(test)]
#[path = "../tests/caching_tests.rs"]
mod tests;
