use crate::boost::PreferenceBooster;
use crate::executor::{HybridFn, LayerMap, LayerSearchExecutor, SearchFn};
use crate::fusion::RrfFusion;
use crate::planner::RetrievalPlanner;
use crate::query_classifier::QueryClassifier;
use crate::query_expansion::QueryExpander;
use crate::rerank::{CrossEncoderReranker, RerankFn, RuleReranker};
use canon_protocol::SearchResult;

/// Retrieval orchestrator: classify, plan, fan out, fuse, boost, rerank.
///
/// Holds only immutable tables, so one router can serve concurrent
/// queries; all per-query state is local to [`RetrievalRouter::route`].
pub struct RetrievalRouter {
    layer_map: LayerMap,
    expander: QueryExpander,
    fusion: RrfFusion,
}

impl RetrievalRouter {
    pub fn new() -> Self {
        Self::with_layer_map(LayerMap::default())
    }

    pub fn with_layer_map(layer_map: LayerMap) -> Self {
        Self {
            layer_map,
            expander: QueryExpander::new(),
            fusion: RrfFusion::default(),
        }
    }

    /// Run the full pipeline for one query. Never fails: backend errors
    /// degrade per collection and an unmatched query yields an empty
    /// list. The cross-encoder stage runs only when `rerank_fn` is
    /// supplied.
    #[must_use]
    pub fn route(
        &self,
        query: &str,
        search_fn: SearchFn<'_>,
        hybrid_fn: Option<HybridFn<'_>>,
        rerank_fn: Option<RerankFn<'_>>,
    ) -> Vec<SearchResult> {
        let expanded_query = self.expander.expand(query);

        let intent = QueryClassifier::classify(query);
        let plan = RetrievalPlanner::plan(intent);
        log::debug!(
            "route: query='{query}', intent={intent:?}, layers={:?}, top_k={}",
            plan.layers,
            plan.final_top_k
        );

        // Hybrid only when supplied and the query shape suits it; the
        // executor still gates per collection.
        let hybrid_active = match hybrid_fn {
            Some(f) if self.expander.should_use_hybrid(query) => Some(f),
            _ => None,
        };

        let executor = LayerSearchExecutor::new(&self.layer_map);
        let results_by_layer = executor.execute(&plan, &expanded_query, search_fn, hybrid_active);

        let fused = self.fusion.fuse(results_by_layer, &plan.weight_per_layer);
        log::debug!("fused: {} unique candidates", fused.len());

        let boosted = PreferenceBooster::boost(intent, fused);
        let final_results = RuleReranker::rerank(query, boosted, plan.final_top_k);

        match rerank_fn {
            Some(rerank_fn) if !final_results.is_empty() => {
                CrossEncoderReranker::rerank(query, final_results, rerank_fn)
            }
            _ => final_results,
        }
    }
}

impl Default for RetrievalRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canon_protocol::RawHit;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_query_with_empty_backend_yields_empty_results() {
        let router = RetrievalRouter::new();
        let search = |_c: &str, _q: &str, _k: usize| -> crate::error::Result<Vec<RawHit>> {
            Ok(vec![])
        };
        let results = router.route("", &search, None, None);
        assert_eq!(results.len(), 0);
    }

    #[test]
    fn all_backend_failures_still_yield_empty_results() {
        let router = RetrievalRouter::new();
        let search = |_c: &str, _q: &str, _k: usize| -> crate::error::Result<Vec<RawHit>> {
            Err(crate::error::SearchError::Backend("down".to_string()))
        };
        let results = router.route("John 3:16", &search, None, None);
        assert_eq!(results.len(), 0);
    }

    #[test]
    fn hybrid_is_skipped_for_long_conceptual_queries() {
        let router = RetrievalRouter::new();
        let hybrid_called = std::cell::Cell::new(false);

        let search = |_c: &str, _q: &str, _k: usize| -> crate::error::Result<Vec<RawHit>> {
            Ok(vec![])
        };
        let hybrid = |_q: &str, _c: &str, _k: usize| -> crate::error::Result<Vec<RawHit>> {
            hybrid_called.set(true);
            Ok(vec![])
        };

        let _ = router.route(
            "why did the walls around that ancient city collapse after seven days",
            &search,
            Some(&hybrid),
            None,
        );
        assert!(!hybrid_called.get());

        let _ = router.route("Jericho walls", &search, Some(&hybrid), None);
        assert!(hybrid_called.get());
    }
}
