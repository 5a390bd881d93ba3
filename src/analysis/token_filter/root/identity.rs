//! Identity reducer implementation.

use super::RootReducer;

/// Reducer that returns words unchanged.
#[derive(Debug, Clone, Default)]
pub struct IdentityReducer;

impl IdentityReducer {
    pub fn new() -> Self {
        IdentityReducer
    }
}

impl RootReducer for IdentityReducer {
    fn reduce(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}
