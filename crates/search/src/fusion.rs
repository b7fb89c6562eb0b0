use canon_protocol::{RawHit, SearchResult};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Anything a weighted RRF pass can rank: keyed by a stable id, with a
/// score slot the fused aggregate overwrites.
pub trait Fusable {
    fn fusion_id(&self) -> &str;
    fn set_fused(&mut self, score: f32);
}

impl Fusable for SearchResult {
    fn fusion_id(&self) -> &str {
        self.id()
    }

    fn set_fused(&mut self, score: f32) {
        self.set_fused_score(score);
    }
}

impl Fusable for RawHit {
    fn fusion_id(&self) -> &str {
        &self.id
    }

    fn set_fused(&mut self, score: f32) {
        self.score = score;
    }
}

/// Weighted Reciprocal Rank Fusion over ordered ranked lists.
///
/// Used twice: across retrieval layers with the planner's weights, and
/// inside hybrid search to merge semantic and lexical sub-results.
pub struct RrfFusion {
    /// RRF constant k (typically 60)
    k: f32,
}

/// Fixed sub-fusion weights for hybrid (semantic + lexical) search.
pub const SEMANTIC_WEIGHT: f32 = 0.6;
pub const LEXICAL_WEIGHT: f32 = 0.4;

impl RrfFusion {
    pub const DEFAULT_K: f32 = 60.0;

    pub fn new(k: f32) -> Self {
        Self { k }
    }

    /// Fuse ranked lists into a single ranking.
    ///
    /// RRF formula: `score(d) = Σ weight_i / (k + rank_i(d) + 1)` with
    /// zero-based positional ranks; lists are never re-sorted by their raw
    /// scores first. Each item is registered on first occurrence, and ties
    /// in the fused score break by that first-insertion order. Lists with
    /// no weight entry count with weight 1.0.
    pub fn fuse<T: Fusable>(
        &self,
        ranked_lists: Vec<(String, Vec<T>)>,
        weights: &HashMap<String, f32>,
    ) -> Vec<T> {
        // Insertion-ordered registry; the map only points into it.
        let mut entries: Vec<(T, f32)> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();

        for (list_name, items) in ranked_lists {
            let weight = weights.get(&list_name).copied().unwrap_or(1.0);

            for (rank, item) in items.into_iter().enumerate() {
                let rrf_score = weight * (1.0 / (self.k + rank as f32 + 1.0));

                match slots.get(item.fusion_id()) {
                    Some(&slot) => entries[slot].1 += rrf_score,
                    None => {
                        slots.insert(item.fusion_id().to_string(), entries.len());
                        entries.push((item, rrf_score));
                    }
                }
            }
        }

        let mut fused: Vec<(T, f32)> = entries;
        for (item, score) in &mut fused {
            item.set_fused(*score);
        }

        // Stable sort keeps first-insertion order for equal scores.
        fused.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        fused.into_iter().map(|(item, _)| item).collect()
    }

    /// Merge a semantic and a lexical sub-ranking with the fixed 0.6/0.4
    /// split. Building block for injected hybrid search functions.
    pub fn fuse_semantic_lexical(&self, semantic: Vec<RawHit>, lexical: Vec<RawHit>) -> Vec<RawHit> {
        let weights: HashMap<String, f32> = [
            ("semantic".to_string(), SEMANTIC_WEIGHT),
            ("lexical".to_string(), LEXICAL_WEIGHT),
        ]
        .into_iter()
        .collect();

        self.fuse(
            vec![
                ("semantic".to_string(), semantic),
                ("lexical".to_string(), lexical),
            ],
            &weights,
        )
    }
}

impl Default for RrfFusion {
    fn default() -> Self {
        Self::new(Self::DEFAULT_K)
    }
}
