use crate::error::Result;
use crate::query_classifier::QueryClassifier;
use canon_protocol::{RerankDoc, SearchResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

/// Bonus for a verse-reference query whose detected book matches the
/// candidate's canonical reference.
const VERSE_MATCH_BONUS: f32 = 0.5;
/// Bonus for a detected book name appearing early in the content.
const CONTENT_BOOK_BONUS: f32 = 0.2;
/// Bonus for a detected book name appearing in metadata scripture refs.
const SCRIPTURE_REF_BONUS: f32 = 0.3;

/// Leading window of content checked for book names.
const CONTENT_PREFIX_CHARS: usize = 100;

/// Metadata field holding scripture reference strings.
const SCRIPTURE_REFS_KEY: &str = "scripture_refs";

/// Canonical book names recognized in queries.
static BOOK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(Genesis|Exodus|Leviticus|Numbers|Deuteronomy)\b",
        r"(?i)\b(\d*\s*Samuel|Kings|Chronicles)\b",
        r"(?i)\b(Matthew|Mark|Luke|John|Acts|Romans)\b",
        r"(?i)\b(Corinthians|Galatians|Ephesians|Philippians)\b",
        r"(?i)\b(Colossians|Thessalonians|Timothy|Titus)\b",
        r"(?i)\b(Hebrews|James|Peter|John|Jude|Revelation)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("book pattern"))
    .collect()
});

/// Deterministic heuristic reranker applied after fusion and boosting.
pub struct RuleReranker;

impl RuleReranker {
    /// Adjust fused scores with additive, independent bonuses, then
    /// stable-sort descending (ties keep their prior order) and truncate
    /// to `top_k`.
    #[must_use]
    pub fn rerank(query: &str, mut results: Vec<SearchResult>, top_k: usize) -> Vec<SearchResult> {
        let has_verse_ref = QueryClassifier::has_verse_reference(query);
        let query_books = extract_book_names(query);
        let books_lower: Vec<String> = query_books.iter().map(|b| b.to_lowercase()).collect();

        for result in &mut results {
            let mut bonus = 0.0;

            // Exact verse match: query reference book against canonical id
            if has_verse_ref {
                if let Some(osis_id) = result.osis_id() {
                    let osis_lower = osis_id.to_lowercase();
                    if books_lower.iter().any(|b| osis_lower.contains(b)) {
                        bonus += VERSE_MATCH_BONUS;
                    }
                }
            }

            // Book name early in the passage text
            if !books_lower.is_empty() {
                let head: String = result
                    .content()
                    .to_lowercase()
                    .chars()
                    .take(CONTENT_PREFIX_CHARS)
                    .collect();
                if books_lower.iter().any(|b| head.contains(b)) {
                    bonus += CONTENT_BOOK_BONUS;
                }
            }

            // Book name in metadata scripture references
            if scripture_refs_match(result, &books_lower) {
                bonus += SCRIPTURE_REF_BONUS;
            }

            if bonus > 0.0 {
                result.add_bonus(bonus);
            }
        }

        results.sort_by(|a, b| {
            b.score()
                .partial_cmp(&a.score())
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }
}

fn scripture_refs_match(result: &SearchResult, books_lower: &[String]) -> bool {
    if books_lower.is_empty() {
        return false;
    }
    let Some(refs) = result.metadata().get(SCRIPTURE_REFS_KEY) else {
        return false;
    };

    // Accept both a single string and a list of strings.
    let ref_strings: Vec<&str> = match refs {
        serde_json::Value::String(s) => vec![s.as_str()],
        serde_json::Value::Array(items) => items.iter().filter_map(|v| v.as_str()).collect(),
        _ => Vec::new(),
    };

    ref_strings.iter().any(|r| {
        let r_lower = r.to_lowercase();
        books_lower.iter().any(|b| r_lower.contains(b))
    })
}

/// Extract canonical book names literally present in the query.
fn extract_book_names(query: &str) -> Vec<String> {
    let mut books = Vec::new();
    for pattern in BOOK_PATTERNS.iter() {
        for caps in pattern.captures_iter(query) {
            if let Some(m) = caps.get(1) {
                books.push(m.as_str().to_string());
            }
        }
    }
    books
}

/// Cross-encoder documents are capped; reranking the long tail is not
/// worth the pairwise scoring cost.
const CROSS_ENCODER_TOP_K: usize = 5;

pub type RerankFn<'a> = &'a dyn Fn(&str, &[RerankDoc], usize) -> Result<Vec<RerankDoc>>;

/// Optional final rescoring stage backed by an injected pairwise
/// relevance function. The plugged-in function owns its own failure
/// policy; if an error surfaces anyway, the prior ranking is kept.
pub struct CrossEncoderReranker;

impl CrossEncoderReranker {
    #[must_use]
    pub fn rerank(
        query: &str,
        results: Vec<SearchResult>,
        rerank_fn: RerankFn<'_>,
    ) -> Vec<SearchResult> {
        if results.is_empty() {
            return results;
        }

        let documents: Vec<RerankDoc> = results.iter().map(SearchResult::to_rerank_doc).collect();
        let top_k = results.len().min(CROSS_ENCODER_TOP_K);

        match rerank_fn(query, &documents, top_k) {
            Ok(reranked) => reranked
                .into_iter()
                .enumerate()
                .map(|(i, doc)| {
                    // Layer tags travel positionally; the reranker only
                    // sees id/content/score/metadata.
                    let source_layer = results
                        .get(i)
                        .map(|r| r.source_layer().to_string())
                        .unwrap_or_default();
                    SearchResult::from_reranked(doc, source_layer)
                })
                .collect(),
            Err(e) => {
                log::warn!("cross-encoder rerank failed, keeping prior ranking: {e}");
                results
            }
        }
    }
}
