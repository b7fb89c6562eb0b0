mod boost;
mod error;
mod executor;
mod fusion;
mod planner;
mod query_classifier;
mod query_expansion;
mod rerank;
mod router;

pub use boost::{PreferenceBooster, PREFERENCE_BOOST};
pub use error::{Result, SearchError};
pub use executor::{HybridFn, LayerMap, LayerSearchExecutor, SearchFn};
pub use fusion::{Fusable, RrfFusion, LEXICAL_WEIGHT, SEMANTIC_WEIGHT};
pub use planner::{
    RetrievalPlan, RetrievalPlanner, LAYER_CHAPTERS, LAYER_COMMENTARY, LAYER_COMMENTARY_CHAPTERS,
    LAYER_PERICOPES, LAYER_VERSES,
};
pub use query_classifier::{QueryClassifier, QueryIntent};
pub use query_expansion::QueryExpander;
pub use rerank::{CrossEncoderReranker, RerankFn, RuleReranker};
pub use router::RetrievalRouter;

pub use canon_protocol::{Metadata, RawHit, RerankDoc, SearchResult, OSIS_ID_KEY};
