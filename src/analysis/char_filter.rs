//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw string before it reaches the tokenizer.
//! The normalizer runs them in order: lower-casing first, then punctuation
//! removal, so the tokenizer only ever sees lower-case letters, digits and
//! whitespace.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode-aware lower-casing
//! - [`punctuation::PunctuationCharFilter`] - Removes a fixed punctuation set
//!
//! # Examples
//!
//! ```
//! use palaver::analysis::char_filter::CharFilter;
//! use palaver::analysis::char_filter::punctuation::PunctuationCharFilter;
//!
//! let filter = PunctuationCharFilter::new();
//! assert_eq!(filter.filter("what's up?"), "whats up");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod punctuation;

pub use lowercase::LowercaseCharFilter;
pub use punctuation::PunctuationCharFilter;
