//! Dictionary lemmatizer implementation.
//!
//! The lemmatizer maps a word to a base form that exists in its vocabulary.
//! Irregular forms are looked up directly ("went" → "go"); regular forms are
//! resolved by trying detachment rules ("-ies" → "-y", "-ing" → "", "-ing" →
//! "-e", ...) and keeping the first candidate found in the vocabulary. A word
//! with no known base form is returned unchanged, so the lemmatizer never
//! invents non-words.
//!
//! # Examples
//!
//! ```
//! use palaver::analysis::token_filter::root::RootReducer;
//! use palaver::analysis::token_filter::root::lemma::Lemmatizer;
//!
//! let lemmatizer = Lemmatizer::new();
//!
//! assert_eq!(lemmatizer.reduce("jokes"), "joke");
//! assert_eq!(lemmatizer.reduce("laughing"), "laugh");
//! assert_eq!(lemmatizer.reduce("went"), "go");
//! assert_eq!(lemmatizer.reduce("funnier"), "funny");
//! ```

use std::sync::LazyLock;

use ahash::{AHashMap, AHashSet};

use super::RootReducer;

/// Irregular inflections and their base forms.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("am", "be"),
    ("are", "be"),
    ("is", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("has", "have"),
    ("had", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("went", "go"),
    ("gone", "go"),
    ("goes", "go"),
    ("said", "say"),
    ("says", "say"),
    ("saw", "see"),
    ("seen", "see"),
    ("told", "tell"),
    ("made", "make"),
    ("came", "come"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("got", "get"),
    ("gotten", "get"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("felt", "feel"),
    ("left", "leave"),
    ("ran", "run"),
    ("met", "meet"),
    ("heard", "hear"),
    ("found", "find"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("taught", "teach"),
    ("caught", "catch"),
    ("slept", "sleep"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("wrote", "write"),
    ("written", "write"),
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
];

/// Detachment rules tried in order: (suffix, replacement).
const DETACHMENT_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("ses", "s"),
    ("es", "e"),
    ("es", ""),
    ("s", ""),
    ("ied", "y"),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
    ("ier", "y"),
    ("iest", "y"),
    ("er", "e"),
    ("er", ""),
    ("est", "e"),
    ("est", ""),
    ("ly", ""),
];

/// Base forms known to the default vocabulary.
const DEFAULT_VOCABULARY: &[&str] = &[
    // conversation
    "hello", "hi", "hey", "howdy", "greeting", "greet", "welcome", "morning", "afternoon",
    "evening", "night", "bye", "goodbye", "farewell", "later", "soon", "see", "care", "leave",
    "thank", "thanks", "appreciate", "grateful", "gratitude", "help", "joke", "laugh", "funny",
    "hilarious", "humor", "pun", "riddle", "story", "tell", "talk", "chat", "say", "ask",
    "answer", "question", "reply", "mean", "understand", "repeat", "explain",
    // common verbs
    "be", "have", "do", "go", "get", "make", "know", "think", "take", "come", "give", "find",
    "use", "work", "call", "try", "feel", "become", "put", "keep", "let", "begin", "seem",
    "show", "hear", "play", "run", "move", "like", "love", "live", "believe", "hold", "bring",
    "happen", "write", "sit", "stand", "lose", "pay", "meet", "include", "continue", "set",
    "learn", "change", "lead", "watch", "follow", "stop", "create", "speak", "read", "spend",
    "grow", "open", "walk", "win", "offer", "remember", "consider", "appear", "buy", "wait",
    "serve", "die", "send", "expect", "build", "stay", "fall", "cut", "reach", "kill",
    "remain", "suggest", "raise", "pass", "sell", "require", "report", "decide", "pull",
    "need", "want", "look", "start", "turn", "hope", "enjoy", "smile", "cry", "sleep", "eat",
    "drink", "cook", "teach", "catch", "study", "worry", "hurry", "carry", "marry", "wish",
    "miss", "guess", "fix", "wonder", "agree", "close", "hate", "share", "check",
    // common nouns and adjectives
    "day", "time", "year", "week", "today", "tomorrow", "weather", "friend", "person", "man",
    "woman", "child", "mouse", "foot", "tooth", "goose", "thing", "way", "life", "world",
    "home", "job", "name", "problem", "idea", "game", "music", "movie", "book", "food",
    "good", "bad", "great", "nice", "happy", "sad", "cool", "awesome", "silly", "crazy",
    "easy", "hard", "new", "old", "big", "small", "long", "short", "early", "late", "quick",
    "kind", "sweet", "lucky",
];

static DEFAULT_VOCABULARY_SET: LazyLock<AHashSet<String>> = LazyLock::new(|| {
    DEFAULT_VOCABULARY.iter().map(|&w| w.to_string()).collect()
});

static IRREGULAR_FORMS_MAP: LazyLock<AHashMap<String, String>> = LazyLock::new(|| {
    IRREGULAR_FORMS
        .iter()
        .map(|&(form, base)| (form.to_string(), base.to_string()))
        .collect()
});

/// Dictionary-based lemmatizer.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    vocabulary: AHashSet<String>,
    irregular: AHashMap<String, String>,
}

impl Lemmatizer {
    /// Create a lemmatizer with the default English vocabulary.
    pub fn new() -> Self {
        Lemmatizer {
            vocabulary: DEFAULT_VOCABULARY_SET.clone(),
            irregular: IRREGULAR_FORMS_MAP.clone(),
        }
    }

    /// Extend the vocabulary with additional base forms.
    pub fn with_vocabulary<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocabulary
            .extend(words.into_iter().map(|w| w.into().to_lowercase()));
        self
    }

    /// Register an irregular form.
    pub fn with_irregular<S: Into<String>>(mut self, form: S, base: S) -> Self {
        self.irregular
            .insert(form.into().to_lowercase(), base.into().to_lowercase());
        self
    }

    /// Whether the vocabulary contains `word` as a base form.
    pub fn knows(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    /// Candidates produced by the detachment rules, in rule order.
    fn candidates<'a>(&'a self, word: &'a str) -> impl Iterator<Item = String> + 'a {
        DETACHMENT_RULES.iter().flat_map(move |(suffix, replacement)| {
            let mut found = Vec::new();
            if let Some(stem) = word.strip_suffix(suffix) {
                if !stem.is_empty() {
                    found.push(format!("{stem}{replacement}"));
                    // running -> runn -> run
                    if replacement.is_empty() && Self::ends_with_double_consonant(stem) {
                        found.push(stem[..stem.len() - 1].to_string());
                    }
                }
            }
            found
        })
    }

    fn ends_with_double_consonant(stem: &str) -> bool {
        let bytes = stem.as_bytes();
        let len = bytes.len();
        len >= 2
            && bytes[len - 1] == bytes[len - 2]
            && bytes[len - 1].is_ascii_alphabetic()
            && !matches!(bytes[len - 1], b'a' | b'e' | b'i' | b'o' | b'u')
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RootReducer for Lemmatizer {
    fn reduce(&self, word: &str) -> String {
        if self.vocabulary.contains(word) {
            return word.to_string();
        }
        if let Some(base) = self.irregular.get(word) {
            return base.clone();
        }

        self.candidates(word)
            .find(|candidate| self.vocabulary.contains(candidate))
            .unwrap_or_else(|| word.to_string())
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
