//! Three-stage resolution over a manifest.
//!
//! Model -> ViewModel -> View -> Prefab. At each stage every structurally
//! compatible mapping is scored with the [`ScoreEvaluator`] and the highest
//! score wins; on a tie the mapping registered first wins.
//!
//! A type with the `VIEW_MODEL` capability may itself be registered as a model
//! (e.g. a view model wrapping another view model), so the model path is tried
//! first and direct ViewModel -> View resolution is the fallback.

use crate::caches::query_trace;
use crate::error::{InvalidManifestError, ResolveError, Stage};
use crate::evaluator::ScoreEvaluator;
use crate::manifest::{Manifest, MappingManifest, validate_manifest};
use crate::mapping::{PrefabMapping, TypeMapping};
use crate::problem::{Problem, Solution};
use std::sync::Arc;
use tracing::{debug, trace};
use viewmap_common::VariantSet;
use viewmap_types::{TypeCapabilities, TypeId};

/// Something that turns a [`Problem`] into a [`Solution`].
///
/// `Ok(None)` is the answer for a problem without a type.
pub trait Resolve: Send + Sync {
    fn resolve(&self, problem: &Problem) -> Result<Option<Arc<Solution>>, ResolveError>;

    /// Whether `ty` is interned in this resolver's type table.
    fn is_resolvable(&self, ty: TypeId) -> bool;

    /// Check that `solution` is still a chain of the current manifest.
    ///
    /// A solution produced under an earlier manifest generation may refer to
    /// ids that now name other types; the first link that no longer holds is
    /// reported as [`ResolveError::Stale`].
    fn revalidate(&self, solution: &Solution) -> Result<(), ResolveError>;
}

impl<R: Resolve + ?Sized> Resolve for Box<R> {
    fn resolve(&self, problem: &Problem) -> Result<Option<Arc<Solution>>, ResolveError> {
        (**self).resolve(problem)
    }

    fn is_resolvable(&self, ty: TypeId) -> bool {
        (**self).is_resolvable(ty)
    }

    fn revalidate(&self, solution: &Solution) -> Result<(), ResolveError> {
        (**self).revalidate(solution)
    }
}

impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, problem: &Problem) -> Result<Option<Arc<Solution>>, ResolveError> {
        (**self).resolve(problem)
    }

    fn is_resolvable(&self, ty: TypeId) -> bool {
        (**self).is_resolvable(ty)
    }

    fn revalidate(&self, solution: &Solution) -> Result<(), ResolveError> {
        (**self).revalidate(solution)
    }
}

/// Stateless resolver over a validated manifest.
pub struct Resolver<M: Manifest = MappingManifest> {
    manifest: Arc<M>,
    evaluator: ScoreEvaluator,
}

impl<M: Manifest> Resolver<M> {
    /// Validate `manifest` and build a resolver over it.
    pub fn new(manifest: Arc<M>, evaluator: ScoreEvaluator) -> Result<Self, InvalidManifestError> {
        validate_manifest(&*manifest)?;
        debug!(
            models_to_view_models = manifest.models_to_view_models().len(),
            view_models_to_views = manifest.view_models_to_views().len(),
            views_to_prefabs = manifest.views_to_prefabs().len(),
            "Resolver::new - manifest validated"
        );
        Ok(Self {
            manifest,
            evaluator,
        })
    }

    pub fn manifest(&self) -> &M {
        &self.manifest
    }

    pub fn evaluator(&self) -> &ScoreEvaluator {
        &self.evaluator
    }

    fn solve(&self, ty: TypeId, variants: &VariantSet) -> Result<Solution, ResolveError> {
        let capabilities = self.manifest.types().capabilities(ty);
        if !capabilities.contains(TypeCapabilities::VIEW_MODEL) {
            return self.resolve_from_model(ty, variants);
        }

        match self.resolve_from_model(ty, variants) {
            Ok(solution) => Ok(solution),
            Err(model_error) => {
                debug!(
                    type_id = ty.0,
                    error = %model_error,
                    "model path failed for view model input, resolving as view model"
                );
                self.resolve_from_view_model(None, ty, variants)
            }
        }
    }

    fn resolve_from_model(
        &self,
        model: TypeId,
        variants: &VariantSet,
    ) -> Result<Solution, ResolveError> {
        let mapping = self.resolve_type_mapping(
            Stage::ModelToViewModel,
            model,
            variants,
            self.manifest.models_to_view_models(),
        )?;
        self.resolve_from_view_model(Some(mapping.source), mapping.target, variants)
    }

    fn resolve_from_view_model(
        &self,
        model: Option<TypeId>,
        view_model: TypeId,
        variants: &VariantSet,
    ) -> Result<Solution, ResolveError> {
        let view = self.resolve_type_mapping(
            Stage::ViewModelToView,
            view_model,
            variants,
            self.manifest.view_models_to_views(),
        )?;
        let prefab = self.resolve_prefab_from_view_type(view.target, variants)?;
        Ok(Solution::new(
            model,
            view_model,
            view.target,
            prefab.prefab.clone(),
            prefab.variants.clone(),
        ))
    }

    /// Pick the best mapping in `mappings` whose source accepts `ty`.
    ///
    /// For [`Stage::ModelToViewModel`], candidates whose view model has no
    /// view with a registered prefab are skipped.
    pub fn resolve_type_mapping<'m>(
        &self,
        stage: Stage,
        ty: TypeId,
        variants: &VariantSet,
        mappings: &'m [TypeMapping],
    ) -> Result<&'m TypeMapping, ResolveError> {
        let types = self.manifest.types();
        let mut best: Option<(i32, &'m TypeMapping)> = None;

        for (index, mapping) in mappings.iter().enumerate() {
            let Some(type_score) = self.evaluator.type_score(types, mapping.source, ty) else {
                continue;
            };
            if stage == Stage::ModelToViewModel && !self.has_presentable_view(mapping.target) {
                trace!(%stage, index, "candidate view model has no presentable view");
                continue;
            }
            let Some(variant_score) = self.evaluator.variant_score(
                variants,
                &mapping.variants,
                &mapping.implicit_variants,
            ) else {
                trace!(%stage, index, "candidate rejected by variants");
                continue;
            };
            let score = type_score.saturating_add(variant_score);
            trace!(%stage, index, type_score, variant_score, score, "candidate scored");
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, mapping));
            }
        }

        best.map(|(_, mapping)| mapping)
            .ok_or_else(|| self.no_candidate(stage, ty, variants))
    }

    /// Pick the prefab for exactly `view`; only variants decide between them.
    pub fn resolve_prefab_from_view_type(
        &self,
        view: TypeId,
        variants: &VariantSet,
    ) -> Result<&PrefabMapping, ResolveError> {
        let mut best: Option<(i32, &PrefabMapping)> = None;

        for mapping in self
            .manifest
            .views_to_prefabs()
            .iter()
            .filter(|mapping| mapping.view == view)
        {
            let Some(score) = self.evaluator.variant_score(
                variants,
                &mapping.variants,
                &mapping.implicit_variants,
            ) else {
                continue;
            };
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, mapping));
            }
        }

        best.map(|(_, mapping)| mapping)
            .ok_or_else(|| self.no_candidate(Stage::ViewToPrefab, view, variants))
    }

    /// A view model is presentable when some view mapping accepts it and that
    /// view has at least one prefab.
    fn has_presentable_view(&self, view_model: TypeId) -> bool {
        let types = self.manifest.types();
        self.manifest.view_models_to_views().iter().any(|mapping| {
            self.evaluator
                .type_score(types, mapping.source, view_model)
                .is_some()
                && self
                    .manifest
                    .views_to_prefabs()
                    .iter()
                    .any(|prefab| prefab.view == mapping.target)
        })
    }

    /// The first link of `solution` missing from the manifest.
    fn stale_link(&self, solution: &Solution) -> Option<TypeId> {
        let types = self.manifest.types();
        let view_model = solution.view_model;
        let view = solution.view;

        let view_model_links = self.is_resolvable(view_model)
            && self.manifest.view_models_to_views().iter().any(|mapping| {
                mapping.target == view
                    && self
                        .evaluator
                        .type_score(types, mapping.source, view_model)
                        .is_some()
            });
        if !view_model_links {
            return Some(view_model);
        }

        let view_links = self.is_resolvable(view)
            && self.manifest.views_to_prefabs().iter().any(|mapping| {
                mapping.view == view
                    && mapping.prefab == solution.prefab
                    && mapping.variants == solution.prefab_variants
            });
        if !view_links {
            return Some(view);
        }

        let model = solution.model?;
        let model_links = self
            .manifest
            .models_to_view_models()
            .iter()
            .any(|mapping| mapping.source == model && mapping.target == view_model);
        (!model_links).then_some(model)
    }

    fn no_candidate(&self, stage: Stage, ty: TypeId, variants: &VariantSet) -> ResolveError {
        ResolveError::NoCandidate {
            stage,
            ty,
            type_name: self
                .manifest
                .types()
                .name(ty)
                .unwrap_or("<unknown>")
                .to_string(),
            variants: variants.clone(),
        }
    }
}

impl<M: Manifest> Resolve for Resolver<M> {
    fn resolve(&self, problem: &Problem) -> Result<Option<Arc<Solution>>, ResolveError> {
        let Some(ty) = problem.ty() else {
            return Ok(None);
        };

        let query_id = query_trace::enabled().then(query_trace::next_query_id);
        if let Some(query_id) = query_id {
            query_trace::resolve_start(query_id, "resolve", Some(ty), problem.variants());
        }

        let result = self.solve(ty, problem.variants());

        if let Some(query_id) = query_id {
            let outcome = if result.is_ok() { "solved" } else { "failed" };
            query_trace::resolve_end(query_id, "resolve", outcome, false);
        }
        match &result {
            Ok(solution) => debug!(
                problem = %problem,
                view_model = solution.view_model.0,
                view = solution.view.0,
                prefab = %solution.prefab,
                "resolved"
            ),
            Err(error) => debug!(problem = %problem, %error, "resolution failed"),
        }

        result.map(|solution| Some(Arc::new(solution)))
    }

    fn is_resolvable(&self, ty: TypeId) -> bool {
        ty != TypeId::OBJECT && self.manifest.types().contains(ty)
    }

    fn revalidate(&self, solution: &Solution) -> Result<(), ResolveError> {
        match self.stale_link(solution) {
            Some(ty) => Err(ResolveError::Stale { ty }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
