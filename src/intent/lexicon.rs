//! Intent lexicon: canonical triggers per intent.

use std::collections::BTreeSet;
use std::fmt;

use log::{info, warn};
use serde::Serialize;

use crate::analysis::{Normalizer, StopWords};
use crate::error::{PalaverError, Result};

use super::{Intent, IntentKeywords, IntentMap};

/// A canonical keyword or phrase.
///
/// Single-word triggers are compared against the reduced tokens of an
/// utterance; phrase triggers (containing a space) are searched for as a
/// substring of the cleaned utterance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Trigger(String);

impl Trigger {
    /// The canonical text of this trigger.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this trigger spans several words.
    pub fn is_phrase(&self) -> bool {
        self.0.contains(' ')
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mapping from each matchable intent to its set of canonical triggers.
///
/// The lexicon is only ever built through [`IntentLexicon::build`], so every
/// trigger has gone through the same [`Normalizer`] that later processes
/// queries. [`Intent::Fallback`] never has triggers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntentLexicon {
    triggers: IntentMap<BTreeSet<Trigger>>,
}

impl IntentLexicon {
    /// Normalize raw keywords into canonical triggers.
    ///
    /// Each keyword runs through `normalizer` with stop words kept. A keyword
    /// that normalizes to a single token becomes a word trigger; several
    /// tokens become a phrase trigger. Keywords that normalize to nothing are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when keywords are given for
    /// [`Intent::Fallback`], when an intent is left with no usable trigger, or
    /// when a phrase changes under root reduction (such a phrase could never
    /// occur in a cleaned utterance).
    pub fn build(raw: &IntentKeywords, normalizer: &Normalizer) -> Result<Self> {
        let mut triggers = IntentMap::new();

        for (&intent, keywords) in raw {
            if intent.is_fallback() {
                return Err(PalaverError::config(
                    "'fallback' is the default intent and cannot have keywords",
                ));
            }

            let mut set = BTreeSet::new();
            for keyword in keywords {
                let analysis = normalizer.analyze(keyword, StopWords::Keep)?;
                match analysis.tokens.len() {
                    0 => {
                        warn!(
                            "Skipping keyword {keyword:?} for intent '{intent}': nothing left after normalization"
                        );
                    }
                    1 => {
                        set.insert(Trigger(analysis.tokens[0].clone()));
                    }
                    _ => {
                        let phrase = analysis.tokens.join(" ");
                        if phrase != analysis.cleaned {
                            return Err(PalaverError::config(format!(
                                "phrase {keyword:?} for intent '{intent}' reduces to {phrase:?}, which never occurs in cleaned text {:?}; use a form the {} reducer leaves unchanged",
                                analysis.cleaned,
                                normalizer.reducer_name()
                            )));
                        }
                        set.insert(Trigger(phrase));
                    }
                }
            }

            if set.is_empty() {
                return Err(PalaverError::config(format!(
                    "intent '{intent}' has no usable keywords"
                )));
            }
            triggers.insert(intent, set);
        }

        let lexicon = IntentLexicon { triggers };
        info!(
            "Built intent lexicon: {} intents, {} triggers ({} reducer)",
            lexicon.triggers.len(),
            lexicon.len(),
            normalizer.reducer_name()
        );
        Ok(lexicon)
    }

    /// Triggers of `intent`, if it has any.
    pub fn triggers(&self, intent: Intent) -> Option<&BTreeSet<Trigger>> {
        self.triggers.get(intent)
    }

    /// Intents with triggers, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Intent, &BTreeSet<Trigger>)> {
        self.triggers.iter()
    }

    /// Total number of triggers.
    pub fn len(&self) -> usize {
        self.triggers.iter().map(|(_, set)| set.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
