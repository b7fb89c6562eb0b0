use once_cell::sync::Lazy;
use regex::Regex;

/// Intent of an incoming question, decided once per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryIntent {
    /// Direct verse reference ("John 3:16", "Genesis chapter 1")
    VerseLookup,
    /// Theological concept ("what is sanctification?")
    Doctrinal,
    /// Named secondary authority ("according to Ellen White...")
    SourceSpecific,
    /// Broad topic search (default)
    Topical,
    /// Multi-verse comparison ("compare Romans 3:23 and John 3:16")
    CrossReference,
}

/// Verse reference detection: "John 3:16", "1 Samuel 15:22",
/// "Genesis chapter 1", conjoined references.
static VERSE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(\d*\s*\w+)\s+(\d+):(\d+)(?:-(\d+))?\b",
        r"(?i)\b(\w+)\s+(?:chapter\s+)?(\d+)\b",
        r"(?i)\b(\w+)\s+(\d+):(\d+)(?:\s+and\s+(\w+)\s+(\d+):(\d+))?\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("verse pattern"))
    .collect()
});

/// Named-authority detection: Spirit of Prophecy titles, supporting
/// ministries and well known speakers.
static SOURCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(?:according\s+to\s+)?(?:ellen\s+white|spirit\s+of\s+prophecy|sop)\b",
        r"(?i)\b(?:great\s+controversy|desire\s+of\s+ages|patriarchs\s+and\s+prophets)\b",
        r"(?i)\b(?:testimonies|steps\s+to\s+christ|early\s+writings)\b",
        r"(?i)\b(?:secrets\s+unsealed|amazing\s+facts|3\s*abn)\b",
        r"(?i)\b(?:walter\s+veith|total\s+onslaught|doug\s+batchelor|joe\s+crews)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("source pattern"))
    .collect()
});

/// Doctrinal vocabulary, matched as lowercase substrings.
const DOCTRINAL_KEYWORDS: &[&str] = &[
    // Core doctrines
    "sanctuary",
    "investigative judgment",
    "sabbath",
    "second coming",
    "state of the dead",
    "remnant church",
    "prophetic gift",
    "health message",
    "tithing",
    "baptism",
    "lord's supper",
    // General theological terms
    "salvation",
    "justification",
    "sanctification",
    "atonement",
    "redemption",
    "grace",
    "faith",
    "works",
    "law",
    "gospel",
    "sin",
    "righteousness",
    "repentance",
    "forgiveness",
    "trinity",
    "incarnation",
    "resurrection",
    "eschatology",
    "prophecy",
    "covenant",
    "creation",
    "judgment",
    // Biblical topics
    "unpardonable sin",
    "blasphemy",
    "holy spirit",
    "prayer",
    "worship",
    "church",
    "ministry",
    "discipleship",
    "stewardship",
    "mission",
    "evangelism",
    // Messianic and divine titles
    "glory",
    "king of glory",
    "messiah",
    "christ",
    "lord",
    "son of god",
    "son of man",
    "lamb of god",
    "bread of life",
    "good shepherd",
    "alpha omega",
    "emmanuel",
    "savior",
];

const CROSS_REF_INDICATORS: &[&str] = &["compare", "cross reference", "parallel", "similar"];

pub struct QueryClassifier;

impl QueryClassifier {
    /// Classify a query with ordered first-match rules. Never fails: an
    /// empty or unparseable query falls through to `Topical`.
    #[must_use]
    pub fn classify(query: &str) -> QueryIntent {
        let query_lower = query.to_lowercase();

        if Self::has_verse_reference(query) {
            return QueryIntent::VerseLookup;
        }

        if SOURCE_PATTERNS.iter().any(|p| p.is_match(query)) {
            return QueryIntent::SourceSpecific;
        }

        if DOCTRINAL_KEYWORDS.iter().any(|kw| query_lower.contains(kw)) {
            return QueryIntent::Doctrinal;
        }

        if CROSS_REF_INDICATORS
            .iter()
            .any(|ind| query_lower.contains(ind))
        {
            return QueryIntent::CrossReference;
        }

        QueryIntent::Topical
    }

    /// Shared with the rule reranker, which re-checks the query shape.
    #[must_use]
    pub fn has_verse_reference(query: &str) -> bool {
        VERSE_PATTERNS.iter().any(|p| p.is_match(query))
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryClassifier, QueryIntent};
    use pretty_assertions::assert_eq;

    #[test]
    fn classify_verse_references() {
        assert_eq!(QueryClassifier::classify("John 3:16"), QueryIntent::VerseLookup);
        assert_eq!(
            QueryClassifier::classify("1 Samuel 15:22"),
            QueryIntent::VerseLookup
        );
        assert_eq!(
            QueryClassifier::classify("Genesis chapter 1"),
            QueryIntent::VerseLookup
        );
        assert_eq!(
            QueryClassifier::classify("Romans 3:23 and John 3:16"),
            QueryIntent::VerseLookup
        );
    }

    #[test]
    fn classify_source_specific() {
        assert_eq!(
            QueryClassifier::classify("According to Ellen White, what is salvation?"),
            QueryIntent::SourceSpecific
        );
        assert_eq!(
            QueryClassifier::classify("quotes from the Great Controversy about persecution"),
            QueryIntent::SourceSpecific
        );
    }

    #[test]
    fn classify_doctrinal() {
        assert_eq!(
            QueryClassifier::classify("What is the unpardonable sin?"),
            QueryIntent::Doctrinal
        );
        assert_eq!(
            QueryClassifier::classify("sabbath observance"),
            QueryIntent::Doctrinal
        );
    }

    #[test]
    fn classify_cross_reference() {
        // "compare" alone, without verse refs or doctrinal vocabulary
        assert_eq!(
            QueryClassifier::classify("compare the synoptic accounts"),
            QueryIntent::CrossReference
        );
    }

    #[test]
    fn classify_defaults_to_topical() {
        assert_eq!(
            QueryClassifier::classify("shepherds watching their flocks"),
            QueryIntent::Topical
        );
        assert_eq!(QueryClassifier::classify(""), QueryIntent::Topical);
        assert_eq!(QueryClassifier::classify("   "), QueryIntent::Topical);
    }

    #[test]
    fn verse_reference_wins_over_other_rules() {
        // Contains both a verse reference and a comparison phrase
        assert_eq!(
            QueryClassifier::classify("compare Romans 3:23 and John 3:16"),
            QueryIntent::VerseLookup
        );
    }
}
