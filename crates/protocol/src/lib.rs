use serde::{Deserialize, Serialize};

/// Open string-keyed metadata attached to hits and results.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Metadata key carrying the canonical Book.Chapter.Verse identifier.
pub const OSIS_ID_KEY: &str = "osis_id";

/// Raw hit returned by an injected search or hybrid function.
///
/// `score` is the backend's raw similarity (expected in `[0, 1]` but not
/// enforced). The router never reads it after fusion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHit {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: Metadata,
}

impl RawHit {
    pub fn new(id: impl Into<String>, content: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            score,
            metadata: Metadata::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }
}

/// Document shape exchanged with a pluggable cross-encoder reranker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankDoc {
    pub id: String,
    pub content: String,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rerank_score: Option<f32>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Ranked passage produced by the retrieval router.
///
/// The score moves through three stages: the backend's raw similarity, the
/// fused RRF aggregate, and the final score after boosts/reranking. Only the
/// final one is exposed; `id`, `content`, and `osis_id` never change after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    osis_id: Option<String>,
    content: String,
    #[serde(skip)]
    raw_score: f32,
    #[serde(skip)]
    fused_score: f32,
    #[serde(rename = "score")]
    final_score: f32,
    source_layer: String,
    metadata: Metadata,
}

impl SearchResult {
    /// Normalize a backend hit into a result tagged with its logical layer.
    pub fn from_hit(hit: RawHit, source_layer: &str) -> Self {
        let osis_id = osis_id_of(&hit.metadata);
        Self {
            id: hit.id,
            osis_id,
            content: hit.content,
            raw_score: hit.score,
            fused_score: hit.score,
            final_score: hit.score,
            source_layer: source_layer.to_string(),
            metadata: hit.metadata,
        }
    }

    /// Rebuild a result from a cross-encoder document, re-attaching the
    /// layer tag lost on the way through the reranker. Prefers
    /// `rerank_score` when the reranker provides one.
    pub fn from_reranked(doc: RerankDoc, source_layer: String) -> Self {
        let osis_id = osis_id_of(&doc.metadata);
        let final_score = doc.rerank_score.unwrap_or(doc.score);
        Self {
            id: doc.id,
            osis_id,
            content: doc.content,
            raw_score: doc.score,
            fused_score: doc.score,
            final_score,
            source_layer,
            metadata: doc.metadata,
        }
    }

    pub fn to_rerank_doc(&self) -> RerankDoc {
        RerankDoc {
            id: self.id.clone(),
            content: self.content.clone(),
            score: self.final_score,
            rerank_score: None,
            metadata: self.metadata.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn osis_id(&self) -> Option<&str> {
        self.osis_id.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The currently active score for ranking and output.
    pub fn score(&self) -> f32 {
        self.final_score
    }

    pub fn raw_score(&self) -> f32 {
        self.raw_score
    }

    pub fn fused_score(&self) -> f32 {
        self.fused_score
    }

    pub fn source_layer(&self) -> &str {
        &self.source_layer
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Overwrite the score with the fused RRF aggregate.
    pub fn set_fused_score(&mut self, score: f32) {
        self.fused_score = score;
        self.final_score = score;
    }

    /// Apply an additive adjustment to the final score.
    pub fn add_bonus(&mut self, bonus: f32) {
        self.final_score += bonus;
    }
}

fn osis_id_of(metadata: &Metadata) -> Option<String> {
    metadata
        .get(OSIS_ID_KEY)
        .and_then(|v| v.as_str())
        .map(String::from)
}
