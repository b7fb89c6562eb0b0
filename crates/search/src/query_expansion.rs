/// Phrase expansions keyed by lowercase phrase. First match wins and
/// short-circuits synonym expansion.
const PHRASE_EXPANSIONS: &[(&str, &[&str])] = &[
    // Messianic titles
    (
        "king of glory",
        &["LORD strong mighty", "Psalm 24", "gates lift up heads", "King of Glory"],
    ),
    ("son of god", &["Jesus Christ", "divine", "Messiah", "only begotten"]),
    ("son of man", &["Daniel", "Jesus", "humanity", "prophet"]),
    ("lamb of god", &["sacrifice", "John Baptist", "Passover", "redemption"]),
    ("bread of life", &["Jesus living bread", "John 6", "manna", "eternal life"]),
    ("light of the world", &["Jesus light", "darkness", "John 8", "lamp"]),
    ("good shepherd", &["Jesus shepherd", "sheep", "John 10", "lay down life"]),
    ("alpha omega", &["beginning end", "first last", "Revelation", "eternal"]),
    // Key doctrines
    (
        "unpardonable sin",
        &["blasphemy holy spirit", "forgiveness", "Matthew 12", "eternal sin"],
    ),
    (
        "investigative judgment",
        &["sanctuary", "1844", "Daniel 8:14", "cleansing sanctuary"],
    ),
    ("second coming", &["return Jesus", "parousia", "clouds glory", "revelation"]),
    ("sabbath", &["seventh day", "rest", "holy", "commandment", "remember"]),
    ("state of dead", &["soul sleep", "death", "resurrection", "grave"]),
    (
        "remnant church",
        &["commandments God", "testimony Jesus", "Revelation 12:17"],
    ),
    // Biblical concepts
    ("born again", &["new birth", "regeneration", "John 3", "Nicodemus", "Spirit"]),
    (
        "justified by faith",
        &["Romans", "righteousness", "believe", "grace", "works"],
    ),
    (
        "sanctification",
        &["holy", "Spirit", "progressive", "growth", "righteousness"],
    ),
    (
        "atonement",
        &["sacrifice", "reconciliation", "blood", "forgiveness", "propitiation"],
    ),
    ("covenant", &["promise", "testament", "Abraham", "new covenant", "blood"]),
    ("grace", &["unmerited favor", "gift", "salvation", "mercy", "free"]),
    ("redemption", &["ransom", "bought", "blood", "deliverance", "salvation"]),
    // Prophetic terms
    ("little horn", &["Daniel 7", "Daniel 8", "antichrist", "power", "persecution"]),
    ("mark of beast", &["Revelation 13", "666", "forehead hand", "worship"]),
    ("beast revelation", &["dragon", "leopard", "bear", "lion", "sea"]),
    (
        "woman wilderness",
        &["Revelation 12", "church", "persecution", "1260 days"],
    ),
    ("144000", &["sealed", "Revelation 7", "Revelation 14", "firstfruits"]),
    // Old Testament figures
    ("son of david", &["Messiah", "throne", "covenant", "eternal kingdom"]),
    (
        "servant of lord",
        &["Isaiah 53", "suffering servant", "Messiah", "prophecy"],
    ),
    ("branch", &["Zechariah", "Messiah", "righteous", "David"]),
    // Theological questions
    ("who is god", &["LORD", "Yahweh", "creator", "eternal", "holy"]),
    (
        "what is sin",
        &["transgression law", "unrighteousness", "death", "separation"],
    ),
    ("what is salvation", &["saved", "grace", "faith", "Jesus", "eternal life"]),
    (
        "how to be saved",
        &["believe", "repent", "baptized", "faith Jesus", "confession"],
    ),
];

/// Common theological synonyms, expanded per matching query word.
const THEOLOGICAL_SYNONYMS: &[(&str, &[&str])] = &[
    ("jesus", &["christ", "messiah", "savior", "lord", "son of god", "lamb"]),
    ("god", &["lord", "yahweh", "jehovah", "father", "almighty", "creator"]),
    (
        "holy spirit",
        &["spirit", "comforter", "ghost", "advocate", "paraclete"],
    ),
    ("devil", &["satan", "adversary", "enemy", "serpent", "dragon", "lucifer"]),
    (
        "heaven",
        &["paradise", "glory", "eternal life", "kingdom", "new jerusalem"],
    ),
    ("hell", &["gehenna", "lake of fire", "destruction", "perdition", "grave"]),
    (
        "church",
        &["assembly", "congregation", "body of christ", "ecclesia", "believers"],
    ),
    ("gospel", &["good news", "message", "evangel", "glad tidings"]),
    ("faith", &["belief", "trust", "confidence", "assurance"]),
    ("prayer", &["supplication", "petition", "intercession", "communion"]),
];

/// Synonyms appended per matched word; kept small to avoid drowning the
/// original terms.
const SYNONYMS_PER_TERM: usize = 3;

/// Word count at or below which hybrid search is preferred.
const SHORT_QUERY_WORDS: usize = 4;

/// Static-table-backed query expansion for scripture retrieval.
pub struct QueryExpander;

impl QueryExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expand a query with phrase expansions or theological synonyms.
    /// Returns the query unchanged when no table entry applies.
    #[must_use]
    pub fn expand(&self, query: &str) -> String {
        let query_lower = query.trim().to_lowercase();

        for (phrase, expansions) in PHRASE_EXPANSIONS {
            if query_lower.contains(phrase) {
                return format!("{} {}", query, expansions.join(" "));
            }
        }

        let mut extra: Vec<&str> = Vec::new();
        for word in query_lower.split_whitespace() {
            let clean = word.trim_matches(|c: char| ".,!?;:\"'()[]{}".contains(c));
            if let Some((_, synonyms)) = THEOLOGICAL_SYNONYMS.iter().find(|(term, _)| *term == clean)
            {
                extra.extend(synonyms.iter().take(SYNONYMS_PER_TERM));
            }
        }

        if extra.is_empty() {
            query.to_string()
        } else {
            format!("{} {}", query, extra.join(" "))
        }
    }

    /// Decide whether hybrid (semantic + lexical) search suits a query:
    /// known phrase, known theological term, or a short query likely
    /// aimed at specific wording.
    #[must_use]
    pub fn should_use_hybrid(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();

        if PHRASE_EXPANSIONS
            .iter()
            .any(|(phrase, _)| query_lower.contains(phrase))
        {
            return true;
        }

        if THEOLOGICAL_SYNONYMS
            .iter()
            .any(|(term, _)| query_lower.contains(term))
        {
            return true;
        }

        query.split_whitespace().count() <= SHORT_QUERY_WORDS
    }
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::new()
    }
}
