//! Utterance normalizer.
//!
//! The [`Normalizer`] is the one analysis pipeline shared by intent lexicon
//! construction and query-time classification:
//!
//! ```text
//! Raw Text → lowercase → strip punctuation → Tokenizer → cleaned string
//!                                               ↓
//!                                   StopFilter (queries only)
//!                                               ↓
//!                                          RootFilter → tokens
//! ```
//!
//! Both paths run through [`Normalizer::analyze`]; the only difference is the
//! [`StopWords`] switch. Building triggers and queries through the same value
//! is what keeps a stemmed trigger from silently failing to match a token
//! reduced some other way.
//!
//! # Examples
//!
//! ```
//! use palaver::analysis::normalizer::Normalizer;
//! use palaver::analysis::token_filter::ReductionMode;
//!
//! let normalizer = Normalizer::new(ReductionMode::Stem);
//! let utterance = normalizer.normalize("See you later, friends!").unwrap();
//!
//! assert_eq!(utterance.tokens, vec!["see", "later", "friend"]);
//! assert_eq!(utterance.cleaned, "see you later friends");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::{CharFilter, LowercaseCharFilter, PunctuationCharFilter};
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::{Filter, ReductionMode, RootFilter, RootReducer, StopFilter};
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer};
use crate::error::Result;

/// Whether [`Normalizer::analyze`] drops stop words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopWords {
    /// Drop stop words from the token sequence (query time).
    Remove,
    /// Keep every word (lexicon construction).
    Keep,
}

/// The normalized form of one utterance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedUtterance {
    /// Root-reduced tokens in utterance order.
    pub tokens: Vec<String>,
    /// Lower-cased, punctuation-free words joined by single spaces, before
    /// stop-word removal and root reduction.
    pub cleaned: String,
}

impl NormalizedUtterance {
    /// Whether the utterance produced no words at all.
    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }

    /// Whether `token` is one of the reduced tokens.
    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

/// Immutable text normalization pipeline.
#[derive(Clone)]
pub struct Normalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
    tokenizer: Arc<dyn Tokenizer>,
    stop_filter: StopFilter,
    root_filter: RootFilter,
}

impl Normalizer {
    /// Create a normalizer with the default English stop words, the Unicode
    /// word tokenizer and the reducer for `mode`.
    pub fn new(mode: ReductionMode) -> Self {
        Normalizer {
            char_filters: vec![
                Arc::new(LowercaseCharFilter::new()),
                Arc::new(PunctuationCharFilter::new()),
            ],
            tokenizer: Arc::new(UnicodeWordTokenizer::new()),
            stop_filter: StopFilter::new(),
            root_filter: RootFilter::for_mode(mode),
        }
    }

    /// Replace the stop filter.
    pub fn with_stop_filter(mut self, stop_filter: StopFilter) -> Self {
        self.stop_filter = stop_filter;
        self
    }

    /// Replace the tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Replace the root reducer.
    pub fn with_reducer(mut self, reducer: Arc<dyn RootReducer>) -> Self {
        self.root_filter = RootFilter::with_reducer(reducer);
        self
    }

    /// Replace the punctuation set. Lower-casing always runs first.
    pub fn with_punctuation(mut self, punctuation: PunctuationCharFilter) -> Self {
        self.char_filters = vec![Arc::new(LowercaseCharFilter::new()), Arc::new(punctuation)];
        self
    }

    /// Name of the configured root reducer.
    pub fn reducer_name(&self) -> &'static str {
        self.root_filter.reducer().name()
    }

    /// Name of the configured tokenizer.
    pub fn tokenizer_name(&self) -> &'static str {
        self.tokenizer.name()
    }

    /// The stop filter applied at query time.
    pub fn stop_filter(&self) -> &StopFilter {
        &self.stop_filter
    }

    /// Normalize a query utterance (stop words removed).
    pub fn normalize(&self, text: &str) -> Result<NormalizedUtterance> {
        self.analyze(text, StopWords::Remove)
    }

    /// Run the full pipeline over `text`.
    pub fn analyze(&self, text: &str, stop_words: StopWords) -> Result<NormalizedUtterance> {
        let filtered = self
            .char_filters
            .iter()
            .fold(text.to_string(), |acc, char_filter| char_filter.filter(&acc));

        let words: Vec<Token> = self.tokenizer.tokenize(&filtered)?.collect();
        let cleaned = words
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let mut stream: TokenStream = Box::new(words.into_iter());
        if stop_words == StopWords::Remove {
            stream = self.stop_filter.filter(stream)?;
        }
        stream = self.root_filter.filter(stream)?;

        let tokens = stream
            .filter(|token| !token.is_stopped() && !token.is_empty())
            .map(|token| token.text)
            .collect();

        Ok(NormalizedUtterance { tokens, cleaned })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(ReductionMode::default())
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>(),
            )
            .field("tokenizer", &self.tokenizer.name())
            .field("stop_words", &self.stop_filter.len())
            .field("reducer", &self.reducer_name())
            .finish()
    }
}
