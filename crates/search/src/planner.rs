use crate::query_classifier::QueryIntent;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Logical layer names. Each maps to one or more concrete collections
/// through [`crate::LayerMap`].
pub const LAYER_VERSES: &str = "verses";
pub const LAYER_PERICOPES: &str = "pericopes";
pub const LAYER_CHAPTERS: &str = "chapters";
pub const LAYER_COMMENTARY: &str = "commentary";
pub const LAYER_COMMENTARY_CHAPTERS: &str = "commentary_chapters";

/// Per-query retrieval plan: which layers to search, how many candidates
/// to pull from each, and how much each layer counts during fusion.
#[derive(Debug, Clone)]
pub struct RetrievalPlan {
    pub intent: QueryIntent,
    /// Layer order is load-bearing: fusion ties break by first insertion.
    pub layers: Vec<String>,
    pub k_per_layer: HashMap<String, usize>,
    pub weight_per_layer: HashMap<String, f32>,
    pub final_top_k: usize,
}

impl RetrievalPlan {
    fn new(intent: QueryIntent, final_top_k: usize, entries: &[(&str, usize, f32)]) -> Self {
        let layers = entries.iter().map(|(l, _, _)| l.to_string()).collect();
        let k_per_layer = entries
            .iter()
            .map(|(l, k, _)| (l.to_string(), *k))
            .collect();
        let weight_per_layer = entries
            .iter()
            .map(|(l, _, w)| (l.to_string(), *w))
            .collect();
        Self {
            intent,
            layers,
            k_per_layer,
            weight_per_layer,
            final_top_k,
        }
    }
}

/// Intent-to-plan table with empirically tuned k values and weights.
/// Built once at startup; plans are cloned out per query.
static PLAN_TABLE: Lazy<HashMap<QueryIntent, RetrievalPlan>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        QueryIntent::VerseLookup,
        RetrievalPlan::new(
            QueryIntent::VerseLookup,
            10,
            &[(LAYER_VERSES, 4, 0.7), (LAYER_PERICOPES, 6, 0.3)],
        ),
    );

    // Scripture-first: verses and pericopes primary, commentary for
    // theological context.
    table.insert(
        QueryIntent::Doctrinal,
        RetrievalPlan::new(
            QueryIntent::Doctrinal,
            18,
            &[
                (LAYER_VERSES, 6, 0.35),
                (LAYER_PERICOPES, 8, 0.30),
                (LAYER_COMMENTARY, 6, 0.25),
                (LAYER_CHAPTERS, 4, 0.10),
            ],
        ),
    );

    // Commentary-first: secondary sources primary, scripture for the
    // biblical foundation.
    table.insert(
        QueryIntent::SourceSpecific,
        RetrievalPlan::new(
            QueryIntent::SourceSpecific,
            16,
            &[
                (LAYER_COMMENTARY, 10, 0.50),
                (LAYER_COMMENTARY_CHAPTERS, 6, 0.25),
                (LAYER_PERICOPES, 4, 0.15),
                (LAYER_VERSES, 4, 0.10),
            ],
        ),
    );

    table.insert(
        QueryIntent::CrossReference,
        RetrievalPlan::new(
            QueryIntent::CrossReference,
            18,
            &[
                (LAYER_VERSES, 6, 0.3),
                (LAYER_PERICOPES, 8, 0.5),
                (LAYER_CHAPTERS, 4, 0.2),
            ],
        ),
    );

    table.insert(
        QueryIntent::Topical,
        RetrievalPlan::new(
            QueryIntent::Topical,
            16,
            &[
                (LAYER_VERSES, 6, 0.35),
                (LAYER_PERICOPES, 8, 0.30),
                (LAYER_COMMENTARY, 6, 0.25),
                (LAYER_CHAPTERS, 4, 0.10),
            ],
        ),
    );

    table
});

pub struct RetrievalPlanner;

impl RetrievalPlanner {
    /// Look up the plan for an intent. Every intent has an entry.
    #[must_use]
    pub fn plan(intent: QueryIntent) -> RetrievalPlan {
        PLAN_TABLE
            .get(&intent)
            .cloned()
            .unwrap_or_else(|| PLAN_TABLE[&QueryIntent::Topical].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn verse_lookup_plan_matches_tuned_constants() {
        let plan = RetrievalPlanner::plan(QueryIntent::VerseLookup);
        assert_eq!(plan.layers, vec![LAYER_VERSES, LAYER_PERICOPES]);
        assert_eq!(plan.k_per_layer[LAYER_VERSES], 4);
        assert_eq!(plan.k_per_layer[LAYER_PERICOPES], 6);
        assert_eq!(plan.weight_per_layer[LAYER_VERSES], 0.7);
        assert_eq!(plan.weight_per_layer[LAYER_PERICOPES], 0.3);
        assert_eq!(plan.final_top_k, 10);
    }

    #[test]
    fn source_specific_plan_is_commentary_first() {
        let plan = RetrievalPlanner::plan(QueryIntent::SourceSpecific);
        assert_eq!(plan.layers[0], LAYER_COMMENTARY);
        assert_eq!(plan.k_per_layer[LAYER_COMMENTARY], 10);
        assert_eq!(plan.weight_per_layer[LAYER_COMMENTARY], 0.50);
        assert_eq!(plan.final_top_k, 16);
    }

    #[test]
    fn doctrinal_and_topical_share_layers_but_not_top_k() {
        let doctrinal = RetrievalPlanner::plan(QueryIntent::Doctrinal);
        let topical = RetrievalPlanner::plan(QueryIntent::Topical);
        assert_eq!(doctrinal.layers, topical.layers);
        assert_eq!(doctrinal.k_per_layer, topical.k_per_layer);
        assert_eq!(doctrinal.final_top_k, 18);
        assert_eq!(topical.final_top_k, 16);
    }

    #[test]
    fn every_plan_keys_all_layers_with_positive_weights() {
        for intent in [
            QueryIntent::VerseLookup,
            QueryIntent::Doctrinal,
            QueryIntent::SourceSpecific,
            QueryIntent::Topical,
            QueryIntent::CrossReference,
        ] {
            let plan = RetrievalPlanner::plan(intent);
            assert!(!plan.layers.is_empty());
            for layer in &plan.layers {
                assert!(plan.k_per_layer[layer] > 0);
                assert!(plan.weight_per_layer[layer] > 0.0);
            }
        }
    }
}
