//! Root reduction token filter and reducer implementations.
//!
//! A [`RootReducer`] collapses inflected forms ("jokes", "joking") onto one
//! canonical root. Two strategies ship with the crate:
//!
//! - [`PorterStemmer`] - rule-based suffix stripping; fast, may produce
//!   non-words ("funny" becomes "funni")
//! - [`Lemmatizer`] - dictionary-backed; only produces forms found in its
//!   vocabulary and otherwise leaves the word alone
//!
//! Whatever strategy is chosen must be the one used both for the intent
//! lexicon and at query time. [`ReductionMode`] is the configuration handle
//! that names the strategy.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for root reduction algorithms.
pub trait RootReducer: Send + Sync {
    /// Reduce a lower-cased word to its root form.
    fn reduce(&self, word: &str) -> String;

    /// Get the name of this reducer.
    fn name(&self) -> &'static str;
}

pub mod identity;
pub mod lemma;
pub mod porter;

pub use identity::IdentityReducer;
pub use lemma::Lemmatizer;
pub use porter::PorterStemmer;

/// Root reduction strategy selected by configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionMode {
    /// Porter stemming.
    #[default]
    Stem,
    /// Dictionary lemmatization.
    Lemma,
    /// No reduction; tokens are matched verbatim.
    None,
}

impl ReductionMode {
    /// Build the reducer for this mode.
    pub fn reducer(&self) -> Arc<dyn RootReducer> {
        match self {
            ReductionMode::Stem => Arc::new(PorterStemmer::new()),
            ReductionMode::Lemma => Arc::new(Lemmatizer::new()),
            ReductionMode::None => Arc::new(IdentityReducer::new()),
        }
    }

    /// Configuration name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReductionMode::Stem => "stem",
            ReductionMode::Lemma => "lemma",
            ReductionMode::None => "none",
        }
    }
}

impl fmt::Display for ReductionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter that applies root reduction to tokens.
#[derive(Clone)]
pub struct RootFilter {
    reducer: Arc<dyn RootReducer>,
}

impl fmt::Debug for RootFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootFilter")
            .field("reducer", &self.reducer.name())
            .finish()
    }
}

impl RootFilter {
    /// Create a new root filter with the Porter stemmer.
    pub fn new() -> Self {
        Self::with_reducer(Arc::new(PorterStemmer::new()))
    }

    /// Create a root filter with a custom reducer.
    pub fn with_reducer(reducer: Arc<dyn RootReducer>) -> Self {
        RootFilter { reducer }
    }

    /// Create a root filter for the given mode.
    pub fn for_mode(mode: ReductionMode) -> Self {
        Self::with_reducer(mode.reducer())
    }

    /// The reducer applied by this filter.
    pub fn reducer(&self) -> &Arc<dyn RootReducer> {
        &self.reducer
    }
}

impl Default for RootFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for RootFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let root = self.reducer.reduce(&token.text);
                    token.with_text(root)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "root"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_root_filter() {
        let filter = RootFilter::new();
        let tokens = vec![
            Token::new("running", 0),
            Token::new("jokes", 1),
            Token::new("thanks", 2).stop(),
        ];
        let token_stream = Box::new(tokens.into_iter());

        let result: Vec<Token> = filter.filter(token_stream).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "run");
        assert_eq!(result[1].text, "joke");
        assert_eq!(result[2].text, "thanks"); // Stopped tokens are not processed
    }

    #[test]
    fn test_lemma_mode_filter() {
        let filter = RootFilter::for_mode(ReductionMode::Lemma);
        let tokens = vec![Token::new("jokes", 0), Token::new("went", 1)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result[0].text, "joke");
        assert_eq!(result[1].text, "go");
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(ReductionMode::default(), ReductionMode::Stem);
        assert_eq!(ReductionMode::Stem.reducer().name(), "porter");
        assert_eq!(ReductionMode::Lemma.reducer().name(), "lemma");
        assert_eq!(ReductionMode::None.reducer().name(), "identity");
        assert_eq!(ReductionMode::Lemma.to_string(), "lemma");
    }

    #[test]
    fn test_mode_serde() {
        let mode: ReductionMode = serde_json::from_str("\"lemma\"").unwrap();
        assert_eq!(mode, ReductionMode::Lemma);
        assert_eq!(serde_json::to_string(&ReductionMode::Stem).unwrap(), "\"stem\"");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(RootFilter::new().name(), "root");
    }
}
