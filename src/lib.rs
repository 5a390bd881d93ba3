//! # Palaver
//!
//! A rule-based conversational responder: free-text utterances are mapped to
//! one of a small fixed set of intents by keyword and phrase matching over a
//! normalized token stream, then answered with a canned reply or by an
//! external generator.
//!
//! ## Features
//!
//! - Token-stream analysis pipeline (lower-casing, punctuation stripping,
//!   Unicode word segmentation, stop words, Porter stemming or lemmatization)
//! - Keyword intent lexicon built through the same normalizer as queries
//! - Deterministic classification with declaration-order tie-breaks
//! - Seedable reply selection and pluggable, time-limited generators
//! - Console session driver and `palaver` CLI
//!
//! ## Example
//!
//! ```
//! use palaver::config::ResponderConfig;
//! use palaver::intent::Intent;
//! use palaver::responder::Responder;
//!
//! let responder = Responder::from_config(&ResponderConfig::default()).unwrap();
//! assert_eq!(responder.classify("Thanks a lot!").unwrap(), Intent::Thanks);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod intent;
pub mod responder;
pub mod response;
pub mod session;

pub mod prelude {
    pub use crate::analysis::{NormalizedUtterance, Normalizer};
    pub use crate::config::ResponderConfig;
    pub use crate::error::{PalaverError, Result};
    pub use crate::intent::{Intent, IntentLexicon};
    pub use crate::responder::{Reply, Responder};
    pub use crate::response::{Chooser, RandomChooser, ResponseGenerator};
    pub use crate::session::{Session, Turn};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
