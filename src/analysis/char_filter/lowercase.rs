//! Lowercase char filter.

use super::CharFilter;

/// A char filter that lower-cases the whole input.
///
/// ASCII input takes the fast path; anything else goes through Unicode
/// lower-casing so that "ÉCOLE" and "école" normalize identically.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
