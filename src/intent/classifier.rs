//! Keyword intent classifier.

use std::fmt;
use std::sync::Arc;

use ahash::AHashSet;
use log::debug;
use serde::Serialize;

use crate::analysis::NormalizedUtterance;

use super::{Intent, IntentLexicon};

/// Per-intent match counts for one utterance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IntentScores {
    scores: Vec<(Intent, usize)>,
}

impl IntentScores {
    /// Score of `intent`; zero when it has no triggers.
    pub fn get(&self, intent: Intent) -> usize {
        self.scores
            .iter()
            .find(|(i, _)| *i == intent)
            .map_or(0, |(_, score)| *score)
    }

    /// Scores in declaration order, one entry per intent with triggers.
    pub fn iter(&self) -> impl Iterator<Item = (Intent, usize)> + '_ {
        self.scores.iter().copied()
    }

    /// The intent with the strictly highest positive score; the first in
    /// declaration order wins ties. [`Intent::Fallback`] when all scores are
    /// zero.
    pub fn best(&self) -> Intent {
        let mut best = (Intent::Fallback, 0);
        for &(intent, score) in &self.scores {
            if score > best.1 {
                best = (intent, score);
            }
        }
        best.0
    }
}

impl fmt::Display for IntentScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .scores
            .iter()
            .map(|(intent, score)| format!("{intent}={score}"))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// Count, for every intent in the lexicon, how many of its triggers occur in
/// the utterance.
///
/// A word trigger counts once if it is among `tokens`; a phrase trigger counts
/// once if it is a substring of `cleaned`.
pub fn score(tokens: &[String], cleaned: &str, lexicon: &IntentLexicon) -> IntentScores {
    let token_set: AHashSet<&str> = tokens.iter().map(String::as_str).collect();

    let scores = lexicon
        .iter()
        .map(|(intent, triggers)| {
            let count = triggers
                .iter()
                .filter(|trigger| {
                    if trigger.is_phrase() {
                        cleaned.contains(trigger.as_str())
                    } else {
                        token_set.contains(trigger.as_str())
                    }
                })
                .count();
            (intent, count)
        })
        .collect();

    IntentScores { scores }
}

/// Pick the best-scoring intent for a normalized utterance.
pub fn classify(tokens: &[String], cleaned: &str, lexicon: &IntentLexicon) -> Intent {
    let scores = score(tokens, cleaned, lexicon);
    let intent = scores.best();
    debug!("Classified {cleaned:?} as {intent} ({scores})");
    intent
}

/// Intent classifier trait.
///
/// Implementations map a normalized utterance to one [`Intent`]. They never
/// fail: anything they cannot place is [`Intent::Fallback`].
pub trait IntentClassifier: Send + Sync {
    /// Predict the intent of a normalized utterance.
    fn predict(&self, utterance: &NormalizedUtterance) -> Intent;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// Trigger-counting classifier over an [`IntentLexicon`].
#[derive(Clone, Debug)]
pub struct KeywordIntentClassifier {
    lexicon: Arc<IntentLexicon>,
}

impl KeywordIntentClassifier {
    pub fn new(lexicon: Arc<IntentLexicon>) -> Self {
        KeywordIntentClassifier { lexicon }
    }

    pub fn lexicon(&self) -> &IntentLexicon {
        &self.lexicon
    }

    /// Scores behind a prediction.
    pub fn explain(&self, utterance: &NormalizedUtterance) -> IntentScores {
        score(&utterance.tokens, &utterance.cleaned, &self.lexicon)
    }
}

impl IntentClassifier for KeywordIntentClassifier {
    fn predict(&self, utterance: &NormalizedUtterance) -> Intent {
        classify(&utterance.tokens, &utterance.cleaned, &self.lexicon)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Normalizer;
    use crate::analysis::token_filter::ReductionMode;
    use crate::intent::IntentKeywords;

    fn build(entries: &[(Intent, &[&str])]) -> (Normalizer, IntentLexicon) {
        let normalizer = Normalizer::new(ReductionMode::Stem);
        let raw: IntentKeywords = entries
            .iter()
            .map(|(intent, words)| (*intent, words.iter().map(|w| w.to_string()).collect()))
            .collect();
        let lexicon = IntentLexicon::build(&raw, &normalizer).unwrap();
        (normalizer, lexicon)
    }

    fn classify_text(normalizer: &Normalizer, lexicon: &IntentLexicon, text: &str) -> Intent {
        let utterance = normalizer.normalize(text).unwrap();
        classify(&utterance.tokens, &utterance.cleaned, lexicon)
    }

    #[test]
    fn test_single_match() {
        let (normalizer, lexicon) = build(&[
            (Intent::Greeting, &["hello", "hi"]),
            (Intent::Joke, &["joke", "funny"]),
        ]);

        assert_eq!(classify_text(&normalizer, &lexicon, "Hello there"), Intent::Greeting);
        assert_eq!(classify_text(&normalizer, &lexicon, "Any JOKES?"), Intent::Joke);
    }

    #[test]
    fn test_no_match_is_fallback() {
        let (normalizer, lexicon) = build(&[(Intent::Greeting, &["hello"])]);

        assert_eq!(
            classify_text(&normalizer, &lexicon, "What's the weather today?"),
            Intent::Fallback
        );
        assert_eq!(classify_text(&normalizer, &lexicon, ""), Intent::Fallback);
    }

    #[test]
    fn test_higher_score_wins() {
        let (normalizer, lexicon) = build(&[
            (Intent::Greeting, &["hello"]),
            (Intent::Joke, &["joke", "funny"]),
        ]);

        assert_eq!(
            classify_text(&normalizer, &lexicon, "hello, tell me a funny joke"),
            Intent::Joke
        );
    }

    #[test]
    fn test_tie_goes_to_first_declared_intent() {
        let (normalizer, lexicon) = build(&[
            (Intent::Thanks, &["thanks"]),
            (Intent::Farewell, &["bye"]),
        ]);

        // One trigger each: farewell is declared before thanks.
        assert_eq!(classify_text(&normalizer, &lexicon, "thanks, bye"), Intent::Farewell);
        assert_eq!(classify_text(&normalizer, &lexicon, "bye and thanks"), Intent::Farewell);
    }

    #[test]
    fn test_phrase_triggers_match_cleaned_text() {
        let (normalizer, lexicon) = build(&[(Intent::Farewell, &["see you"])]);

        // "you" is a stop word, so only the phrase trigger can see it.
        let utterance = normalizer.normalize("OK, see you!").unwrap();
        assert_eq!(utterance.tokens, vec!["ok", "see"]);
        assert_eq!(
            classify(&utterance.tokens, &utterance.cleaned, &lexicon),
            Intent::Farewell
        );
        assert_eq!(classify_text(&normalizer, &lexicon, "I see"), Intent::Fallback);
    }

    #[test]
    fn test_trigger_counts_once() {
        let (normalizer, lexicon) = build(&[
            (Intent::Greeting, &["hello"]),
            (Intent::Joke, &["joke", "laugh"]),
        ]);
        let utterance = normalizer.normalize("hello hello hello, a joke to laugh at").unwrap();
        let scores = score(&utterance.tokens, &utterance.cleaned, &lexicon);

        assert_eq!(scores.get(Intent::Greeting), 1);
        assert_eq!(scores.get(Intent::Joke), 2);
        assert_eq!(scores.get(Intent::Thanks), 0);
        assert_eq!(scores.best(), Intent::Joke);
        assert_eq!(scores.to_string(), "greeting=1 joke=2");
    }

    #[test]
    fn test_keyword_classifier() {
        let (normalizer, lexicon) = build(&[(Intent::Thanks, &["thank", "appreciate"])]);
        let classifier = KeywordIntentClassifier::new(Arc::new(lexicon));
        let utterance = normalizer.normalize("I really appreciate it, thanks").unwrap();

        assert_eq!(classifier.predict(&utterance), Intent::Thanks);
        assert_eq!(classifier.explain(&utterance).get(Intent::Thanks), 2);
        assert_eq!(classifier.name(), "keyword");
    }
}
