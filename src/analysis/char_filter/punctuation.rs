//! Punctuation removal char filter.
//!
//! Punctuation is deleted rather than replaced with whitespace, so
//! contractions collapse into a single word ("what's" becomes "whats") and
//! hyphenated words join ("good-bye" becomes "goodbye"). Lexicon keywords go
//! through the same filter, so both sides agree on the collapsed forms.

use ahash::AHashSet;

use super::CharFilter;

/// ASCII punctuation characters.
const ASCII_PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Typographic punctuation commonly produced by phone keyboards and editors.
const TYPOGRAPHIC_PUNCTUATION: &[char] = &[
    '\u{2018}', // left single quotation mark
    '\u{2019}', // right single quotation mark
    '\u{201C}', // left double quotation mark
    '\u{201D}', // right double quotation mark
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2026}', // horizontal ellipsis
    '\u{00AB}', // left guillemet
    '\u{00BB}', // right guillemet
    '\u{00A1}', // inverted exclamation mark
    '\u{00BF}', // inverted question mark
];

/// A char filter that removes a fixed set of punctuation characters.
///
/// Letters, digits and whitespace are always preserved.
#[derive(Clone, Debug)]
pub struct PunctuationCharFilter {
    punctuation: AHashSet<char>,
}

impl PunctuationCharFilter {
    /// Create a filter with the default punctuation set.
    pub fn new() -> Self {
        let punctuation = ASCII_PUNCTUATION
            .chars()
            .chain(TYPOGRAPHIC_PUNCTUATION.iter().copied())
            .collect();
        PunctuationCharFilter { punctuation }
    }

    /// Create a filter with a custom punctuation set.
    ///
    /// Alphanumeric and whitespace characters in `chars` are ignored.
    pub fn with_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let punctuation = chars
            .into_iter()
            .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
            .collect();
        PunctuationCharFilter { punctuation }
    }

    /// Check whether a character is removed by this filter.
    pub fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.contains(&c)
    }
}

impl Default for PunctuationCharFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CharFilter for PunctuationCharFilter {
    fn filter(&self, input: &str) -> String {
        input.chars().filter(|c| !self.is_punctuation(*c)).collect()
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}
