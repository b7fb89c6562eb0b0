use crate::error::Result;
use crate::planner::RetrievalPlan;
use canon_protocol::{RawHit, SearchResult};
use std::collections::HashMap;

/// Injected vector search: `(collection_id, query, k)`.
pub type SearchFn<'a> = &'a dyn Fn(&str, &str, usize) -> Result<Vec<RawHit>>;

/// Injected hybrid search: `(query, collection_id, k)`. Expected to return
/// an already fused semantic + lexical ranking.
pub type HybridFn<'a> = &'a dyn Fn(&str, &str, usize) -> Result<Vec<RawHit>>;

/// Collections where hybrid search pays off: exact phrasing matters for
/// verse and pericope text.
const HYBRID_COLLECTIONS: &[&str] = &[
    "verses",
    "pericopes",
    "kjv_verses",
    "web_verses",
    "kjv_pericopes",
    "web_pericopes",
];

/// Static layer-to-collections configuration. Many-to-many: a layer
/// splits its candidate budget evenly across its collections.
#[derive(Debug, Clone)]
pub struct LayerMap {
    map: HashMap<String, Vec<String>>,
}

impl LayerMap {
    pub fn new(map: HashMap<String, Vec<String>>) -> Self {
        Self { map }
    }

    /// No mappings: every layer resolves to itself.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Resolve a layer to its collections, falling back to the layer name
    /// itself when unmapped.
    pub fn resolve(&self, layer: &str) -> Vec<String> {
        self.map
            .get(layer)
            .cloned()
            .unwrap_or_else(|| vec![layer.to_string()])
    }
}

impl Default for LayerMap {
    /// Collections present in the live index: two scripture translations
    /// per granularity, one commentary corpus.
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(
            "verses".to_string(),
            vec!["kjv_verses".to_string(), "web_verses".to_string()],
        );
        map.insert(
            "pericopes".to_string(),
            vec!["kjv_pericopes".to_string(), "web_pericopes".to_string()],
        );
        map.insert(
            "chapters".to_string(),
            vec!["kjv_chapters".to_string(), "web_chapters".to_string()],
        );
        map.insert(
            "commentary".to_string(),
            vec!["commentary_paragraphs".to_string()],
        );
        map.insert(
            "commentary_chapters".to_string(),
            vec!["commentary_chapters".to_string()],
        );
        Self { map }
    }
}

/// Fans a retrieval plan out across collections and normalizes the hits.
pub struct LayerSearchExecutor<'a> {
    layer_map: &'a LayerMap,
}

impl<'a> LayerSearchExecutor<'a> {
    pub fn new(layer_map: &'a LayerMap) -> Self {
        Self { layer_map }
    }

    /// Execute every layer of the plan. Results within a layer keep
    /// collection-iteration then within-collection-rank order; fusion is
    /// responsible for any re-sorting. A failing collection degrades to
    /// an empty contribution, never aborting the layer.
    ///
    /// `hybrid_fn` is `Some` only when the caller already decided hybrid
    /// search suits this query; the per-collection allow-list still
    /// applies.
    pub fn execute(
        &self,
        plan: &RetrievalPlan,
        expanded_query: &str,
        search_fn: SearchFn<'_>,
        hybrid_fn: Option<HybridFn<'_>>,
    ) -> Vec<(String, Vec<SearchResult>)> {
        let mut results_by_layer = Vec::with_capacity(plan.layers.len());

        for layer in &plan.layers {
            let layer_k = plan.k_per_layer.get(layer).copied().unwrap_or(1);
            let collections = self.layer_map.resolve(layer);
            // Floor division, with at least one candidate per collection.
            // A layer configured with an empty collection list contributes
            // nothing but must not panic the query.
            let k_per_collection = (layer_k / collections.len().max(1)).max(1);

            let mut merged: Vec<SearchResult> = Vec::new();
            for collection in &collections {
                let hits = self.search_collection(
                    collection,
                    expanded_query,
                    k_per_collection,
                    search_fn,
                    hybrid_fn,
                );
                merged.extend(
                    hits.into_iter()
                        .map(|hit| SearchResult::from_hit(hit, layer)),
                );
            }

            log::debug!("layer '{layer}': {} candidates", merged.len());
            results_by_layer.push((layer.clone(), merged));
        }

        results_by_layer
    }

    fn search_collection(
        &self,
        collection: &str,
        query: &str,
        k: usize,
        search_fn: SearchFn<'_>,
        hybrid_fn: Option<HybridFn<'_>>,
    ) -> Vec<RawHit> {
        let outcome = match hybrid_fn {
            Some(hybrid) if HYBRID_COLLECTIONS.contains(&collection) => hybrid(query, collection, k),
            _ => search_fn(collection, query, k),
        };

        match outcome {
            Ok(hits) => hits,
            Err(e) => {
                log::warn!("search failed for collection '{collection}', skipping: {e}");
                Vec::new()
            }
        }
    }
}
