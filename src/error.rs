//! Error types for the Palaver library.
//!
//! All fallible operations in Palaver return [`PalaverError`]. Most of them
//! happen at construction time: a responder that builds successfully does not
//! fail while answering, because generator failures are recovered inside the
//! response selector.
//!
//! # Examples
//!
//! ```
//! use palaver::error::{PalaverError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(PalaverError::config("intent 'greeting' has no responses"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Palaver operations.
#[derive(Error, Debug)]
pub enum PalaverError {
    /// I/O errors (config files, console driver).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Lexicon, response table or responder misconfiguration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Response generator errors.
    #[error("Generator error: {0}")]
    Generator(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PalaverError.
pub type Result<T> = std::result::Result<T, PalaverError>;

impl PalaverError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        PalaverError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PalaverError::Analysis(msg.into())
    }

    /// Create a new generator error.
    pub fn generator<S: Into<String>>(msg: S) -> Self {
        PalaverError::Generator(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PalaverError::Other(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        PalaverError::Generator(format!("Timeout: {}", msg.into()))
    }

    /// Whether this error comes from a bad configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, PalaverError::Config(_))
    }
}
