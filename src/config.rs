//! Responder configuration.
//!
//! [`ResponderConfig`] gathers everything a [`Responder`](crate::responder::Responder)
//! is built from: the raw keyword table, the reply lists, normalization
//! settings and the generator switch. It deserializes from JSON; every field
//! is optional and falls back to the built-in defaults.
//!
//! ```json
//! {
//!   "keywords": { "greeting": ["hello", "hi"], "farewell": ["bye", "see you"] },
//!   "responses": { "greeting": ["Hello!"], "fallback": ["Come again?"] },
//!   "reduction": "lemma",
//!   "seed": 42
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::Normalizer;
use crate::analysis::token_filter::{ReductionMode, StopFilter};
use crate::error::Result;
use crate::intent::{Intent, IntentKeywords};
use crate::response::ResponseLists;
use crate::response::selector::DEFAULT_APOLOGY;

/// Default generator deadline in milliseconds.
pub const DEFAULT_GENERATOR_TIMEOUT_MS: u64 = 10_000;

/// Opening line printed by the console driver.
pub const DEFAULT_GREETING_MESSAGE: &str =
    "Hello! I'm your friendly chatbot. How can I help you today?";

/// Line printed when input ends.
pub const DEFAULT_CLOSING_MESSAGE: &str = "Goodbye!";

const DEFAULT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &["hello", "hi", "hey", "greetings", "howdy"],
    ),
    (
        Intent::Farewell,
        &["bye", "goodbye", "later", "see", "soon", "see you", "take care"],
    ),
    (
        Intent::Joke,
        &["joke", "laugh", "funny", "hilarious", "tell me a joke", "make me laugh"],
    ),
    (Intent::Thanks, &["thank", "thanks", "appreciate", "thank you"]),
];

const DEFAULT_RESPONSES: &[(Intent, &[&str])] = &[
    (Intent::Greeting, &["Hello!", "Hi there!", "Greetings!"]),
    (Intent::Farewell, &["Goodbye!", "See you later!", "Bye!"]),
    (
        Intent::Joke,
        &[
            "Why did the chicken cross the road? To get to the other side!",
            "What do you call fake spaghetti? An impasta!",
        ],
    ),
    (Intent::Thanks, &["You are welcome!", "No problem!", "My pleasure!"]),
    (
        Intent::Fallback,
        &[
            "I'm not sure I understand. Could you rephrase that?",
            "I didn't catch that. Can you say it again?",
        ],
    ),
];

fn table(entries: &[(Intent, &[&str])]) -> std::collections::BTreeMap<Intent, Vec<String>> {
    entries
        .iter()
        .map(|(intent, words)| (*intent, words.iter().map(|w| w.to_string()).collect()))
        .collect()
}

/// Built-in keyword table.
pub fn default_keywords() -> IntentKeywords {
    table(DEFAULT_KEYWORDS)
}

/// Built-in reply lists.
pub fn default_responses() -> ResponseLists {
    table(DEFAULT_RESPONSES)
}

/// Configuration for building a responder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResponderConfig {
    /// Raw keywords and phrases per intent.
    pub keywords: IntentKeywords,

    /// Canned replies per intent; `fallback` is required.
    pub responses: ResponseLists,

    /// Custom stop words. `None` uses the built-in English list.
    pub stop_words: Option<Vec<String>>,

    /// Root reduction applied to keywords and queries.
    pub reduction: ReductionMode,

    /// Delegate every reply to the external generator.
    pub delegate: bool,

    /// Generator deadline in milliseconds. `None` waits indefinitely.
    pub generator_timeout_ms: Option<u64>,

    /// Reply used when the generator fails.
    pub apology: String,

    /// Seed for reply selection. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Opening line of an interactive session.
    pub greeting_message: String,

    /// Closing line when input ends.
    pub closing_message: String,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        ResponderConfig {
            keywords: default_keywords(),
            responses: default_responses(),
            stop_words: None,
            reduction: ReductionMode::default(),
            delegate: false,
            generator_timeout_ms: Some(DEFAULT_GENERATOR_TIMEOUT_MS),
            apology: DEFAULT_APOLOGY.to_string(),
            seed: None,
            greeting_message: DEFAULT_GREETING_MESSAGE.to_string(),
            closing_message: DEFAULT_CLOSING_MESSAGE.to_string(),
        }
    }
}

impl ResponderConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_reduction(mut self, reduction: ReductionMode) -> Self {
        self.reduction = reduction;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_delegate(mut self, delegate: bool) -> Self {
        self.delegate = delegate;
        self
    }

    pub fn with_generator_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.generator_timeout_ms =
            timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_stop_words(mut self, stop_words: Vec<String>) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// Generator deadline, if any.
    pub fn generator_timeout(&self) -> Option<Duration> {
        self.generator_timeout_ms.map(Duration::from_millis)
    }

    /// Build the normalizer described by this configuration.
    pub fn normalizer(&self) -> Normalizer {
        let normalizer = Normalizer::new(self.reduction);
        match &self.stop_words {
            Some(words) => normalizer.with_stop_filter(StopFilter::from_words(words.clone())),
            None => normalizer,
        }
    }
}
