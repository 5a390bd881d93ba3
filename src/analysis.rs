//! Text analysis module for Palaver.
//!
//! This module provides the normalization pipeline used to match utterances
//! against intent triggers: char filters, tokenizers, token filters and the
//! [`Normalizer`] that ties them together.

pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use normalizer::{NormalizedUtterance, Normalizer, StopWords};
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
