use crate::planner::LAYER_COMMENTARY;
use crate::query_classifier::QueryIntent;
use canon_protocol::SearchResult;

/// Flat additive boost for preferred commentary works.
pub const PREFERENCE_BOOST: f32 = 0.15;

/// Work-name substrings (lowercase) that mark the Conflict of the Ages
/// series and Steps to Christ as preferred sources.
const PREFERRED_WORKS: &[&str] = &[
    "patriarchs and prophets",
    "prophets and kings",
    "desire of ages",
    "acts of the apostles",
    "great controversy",
    "steps to christ",
];

/// Metadata field naming the work a commentary passage comes from.
const WORK_NAME_KEY: &str = "book";

/// Nudges preferred commentary works up the fused ranking without
/// drowning out strong scripture results.
pub struct PreferenceBooster;

impl PreferenceBooster {
    /// Apply the boost to fused results. Active only for doctrinal and
    /// source-specific intents, and only on the commentary layer: a
    /// matching work name on any other layer is never boosted. At most
    /// one boost per result.
    #[must_use]
    pub fn boost(intent: QueryIntent, mut results: Vec<SearchResult>) -> Vec<SearchResult> {
        if !matches!(intent, QueryIntent::Doctrinal | QueryIntent::SourceSpecific) {
            return results;
        }

        for result in &mut results {
            if result.source_layer() != LAYER_COMMENTARY {
                continue;
            }

            let work = result
                .metadata()
                .get(WORK_NAME_KEY)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .trim()
                .to_lowercase();

            if PREFERRED_WORKS.iter().any(|w| work.contains(w)) {
                result.add_bonus(PREFERENCE_BOOST);
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canon_protocol::RawHit;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn commentary_result(layer: &str, book: &str) -> SearchResult {
        let hit = RawHit::new("c1", "passage text", 0.5).with_metadata(WORK_NAME_KEY, json!(book));
        let mut result = SearchResult::from_hit(hit, layer);
        result.set_fused_score(0.02);
        result
    }

    #[test]
    fn preferred_work_on_commentary_layer_gains_exactly_the_boost() {
        let results = PreferenceBooster::boost(
            QueryIntent::Doctrinal,
            vec![commentary_result(LAYER_COMMENTARY, "The Desire of Ages")],
        );
        assert!((results[0].score() - (0.02 + PREFERENCE_BOOST)).abs() < 1e-6);
    }

    #[test]
    fn boost_is_inactive_for_topical_intent() {
        let results = PreferenceBooster::boost(
            QueryIntent::Topical,
            vec![commentary_result(LAYER_COMMENTARY, "The Desire of Ages")],
        );
        assert_eq!(results[0].score(), 0.02);
    }

    #[test]
    fn matching_work_on_non_commentary_layer_is_never_boosted() {
        let results = PreferenceBooster::boost(
            QueryIntent::Doctrinal,
            vec![commentary_result("verses", "The Desire of Ages")],
        );
        assert_eq!(results[0].score(), 0.02);
    }

    #[test]
    fn unpreferred_work_is_untouched() {
        let results = PreferenceBooster::boost(
            QueryIntent::SourceSpecific,
            vec![commentary_result(LAYER_COMMENTARY, "Manuscript Releases")],
        );
        assert_eq!(results[0].score(), 0.02);
    }

    #[test]
    fn missing_work_name_is_tolerated() {
        let hit = RawHit::new("c2", "no book field", 0.5);
        let mut result = SearchResult::from_hit(hit, LAYER_COMMENTARY);
        result.set_fused_score(0.02);

        let results = PreferenceBooster::boost(QueryIntent::Doctrinal, vec![result]);
        assert_eq!(results[0].score(), 0.02);
    }
}
