//! Intents and the keyword intent classifier.
//!
//! # Architecture
//!
//! - [`Intent`]: the closed set of labels an utterance can be classified as
//! - [`IntentMap`]: fixed-size mapping keyed by [`Intent`]
//! - [`IntentLexicon`]: canonical triggers per intent, built with the
//!   [`Normalizer`](crate::analysis::Normalizer)
//! - [`IntentClassifier`]: common interface, implemented by
//!   [`KeywordIntentClassifier`]
//!
//! # Example
//!
//! ```
//! use palaver::analysis::Normalizer;
//! use palaver::intent::{classify, Intent, IntentKeywords, IntentLexicon};
//!
//! let normalizer = Normalizer::default();
//! let mut keywords = IntentKeywords::new();
//! keywords.insert(Intent::Greeting, vec!["hello".to_string()]);
//! let lexicon = IntentLexicon::build(&keywords, &normalizer).unwrap();
//!
//! let utterance = normalizer.normalize("Hello there friend").unwrap();
//! assert_eq!(classify(&utterance.tokens, &utterance.cleaned, &lexicon), Intent::Greeting);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PalaverError;

mod classifier;
mod lexicon;

pub use classifier::{IntentClassifier, IntentScores, KeywordIntentClassifier, classify, score};
pub use lexicon::{IntentLexicon, Trigger};

/// Raw keyword table: intent → keywords or phrases, before normalization.
pub type IntentKeywords = BTreeMap<Intent, Vec<String>>;

/// The purpose of a user utterance.
///
/// Declaration order is the iteration order used everywhere, which makes
/// classifier tie-breaks reproducible: on equal scores the intent declared
/// first wins.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Greeting,
    Farewell,
    Joke,
    Thanks,
    /// Default when nothing matches. Never matched by triggers.
    #[default]
    Fallback,
}

impl Intent {
    /// Number of intents.
    pub const COUNT: usize = 5;

    /// Every intent, in declaration order.
    pub const ALL: [Intent; Intent::COUNT] = [
        Intent::Greeting,
        Intent::Farewell,
        Intent::Joke,
        Intent::Thanks,
        Intent::Fallback,
    ];

    /// Configuration name of this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::Joke => "joke",
            Intent::Thanks => "thanks",
            Intent::Fallback => "fallback",
        }
    }

    /// Slot of this intent in an [`IntentMap`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether this is the catch-all intent.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Intent::Fallback)
    }

    /// Whether a session ends after answering this intent.
    pub fn ends_session(&self) -> bool {
        matches!(self, Intent::Farewell)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = PalaverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PalaverError::config(format!("unknown intent '{s}'")))
    }
}

/// Fixed-size mapping from [`Intent`] to `T`, iterated in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentMap<T> {
    slots: [Option<T>; Intent::COUNT],
}

impl<T> IntentMap<T> {
    /// An empty map.
    pub fn new() -> Self {
        IntentMap {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Set the value for `intent`, returning the previous one.
    pub fn insert(&mut self, intent: Intent, value: T) -> Option<T> {
        self.slots[intent.index()].replace(value)
    }

    /// Value stored for `intent`, if any.
    pub fn get(&self, intent: Intent) -> Option<&T> {
        self.slots[intent.index()].as_ref()
    }

    /// Whether `intent` has a value.
    pub fn contains(&self, intent: Intent) -> bool {
        self.slots[intent.index()].is_some()
    }

    /// Populated entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Intent, &T)> {
        Intent::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(intent, slot)| slot.as_ref().map(|value| (intent, value)))
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no intent has a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for IntentMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
