//! Porter stemming algorithm implementation.
//!
//! This module implements the classic Porter (1980) suffix-stripping
//! algorithm for English. Rules are applied in five steps:
//! 1. Plurals and -ed/-ing suffixes, then terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and reduce -ll
//!
//! Words that are not plain ASCII letters (numbers, accented words) are
//! returned unchanged.
//!
//! # Examples
//!
//! ```
//! use palaver::analysis::token_filter::root::RootReducer;
//! use palaver::analysis::token_filter::root::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.reduce("running"), "run");
//! assert_eq!(stemmer.reduce("greetings"), "greet");
//! assert_eq!(stemmer.reduce("funny"), "funni");
//! ```

use super::RootReducer;

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemming algorithm implementation.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl RootReducer for PorterStemmer {
    fn reduce(&self, word: &str) -> String {
        if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word.to_string();
        }

        let mut stem = Stem::new(word);
        stem.step1ab();
        stem.step1c();
        stem.step2();
        stem.step3();
        stem.step4();
        stem.step5();
        stem.into_string()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// Working buffer for one word. All lengths are byte lengths of a prefix of
/// `b`; the word is guaranteed to be lower-case ASCII.
struct Stem {
    b: Vec<u8>,
}

impl Stem {
    fn new(word: &str) -> Self {
        Stem {
            b: word.as_bytes().to_vec(),
        }
    }

    fn into_string(self) -> String {
        // Only ASCII bytes are ever written into the buffer.
        self.b.into_iter().map(char::from).collect()
    }

    fn len(&self) -> usize {
        self.b.len()
    }

    /// Whether `b[i]` is a consonant.
    fn cons(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// The measure m of `b[..len]`: the number of vowel-consonant sequences.
    fn measure(&self, len: usize) -> usize {
        let mut n = 0;
        let mut i = 0;

        while i < len && self.cons(i) {
            i += 1;
        }

        loop {
            while i < len && !self.cons(i) {
                i += 1;
            }
            if i >= len {
                return n;
            }
            while i < len && self.cons(i) {
                i += 1;
            }
            n += 1;
            if i >= len {
                return n;
            }
        }
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|i| !self.cons(i))
    }

    /// Whether `b[..len]` ends with a double consonant.
    fn double_cons(&self, len: usize) -> bool {
        len >= 2 && self.b[len - 1] == self.b[len - 2] && self.cons(len - 1)
    }

    /// Whether `b[..len]` ends consonant-vowel-consonant, where the final
    /// consonant is not w, x or y.
    fn cvc(&self, len: usize) -> bool {
        len >= 3
            && self.cons(len - 1)
            && !self.cons(len - 2)
            && self.cons(len - 3)
            && !matches!(self.b[len - 1], b'w' | b'x' | b'y')
    }

    /// Length of the stem left after removing `suffix`, if the word ends with it.
    fn ends(&self, suffix: &str) -> Option<usize> {
        if self.b.ends_with(suffix.as_bytes()) {
            Some(self.len() - suffix.len())
        } else {
            None
        }
    }

    fn set_to(&mut self, stem_len: usize, replacement: &str) {
        self.b.truncate(stem_len);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    /// Apply the first rule whose suffix matches, if the remaining stem has m > 0.
    fn replace_first(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if let Some(stem_len) = self.ends(suffix) {
                if self.measure(stem_len) > 0 {
                    self.set_to(stem_len, replacement);
                }
                return;
            }
        }
    }

    fn step1ab(&mut self) {
        if self.b.last() == Some(&b's') {
            if let Some(stem_len) = self.ends("sses") {
                self.set_to(stem_len, "ss");
            } else if let Some(stem_len) = self.ends("ies") {
                self.set_to(stem_len, "i");
            } else if self.len() >= 2 && self.b[self.len() - 2] != b's' {
                self.b.pop();
            }
        }

        if let Some(stem_len) = self.ends("eed") {
            if self.measure(stem_len) > 0 {
                self.b.pop();
            }
            return;
        }

        let stripped = match (self.ends("ed"), self.ends("ing")) {
            (Some(stem_len), _) | (None, Some(stem_len)) if self.has_vowel(stem_len) => {
                self.b.truncate(stem_len);
                true
            }
            _ => false,
        };

        if stripped {
            let len = self.len();
            if self.ends("at").is_some() || self.ends("bl").is_some() || self.ends("iz").is_some()
            {
                self.b.push(b'e');
            } else if self.double_cons(len) {
                if !matches!(self.b[len - 1], b'l' | b's' | b'z') {
                    self.b.pop();
                }
            } else if self.measure(len) == 1 && self.cvc(len) {
                self.b.push(b'e');
            }
        }
    }

    fn step1c(&mut self) {
        if let Some(stem_len) = self.ends("y") {
            if self.has_vowel(stem_len) {
                self.set_to(stem_len, "i");
            }
        }
    }

    fn step2(&mut self) {
        self.replace_first(STEP2_RULES);
    }

    fn step3(&mut self) {
        self.replace_first(STEP3_RULES);
    }

    fn step4(&mut self) {
        for suffix in STEP4_SUFFIXES {
            if let Some(stem_len) = self.ends(suffix) {
                if *suffix == "ion" && !(stem_len > 0 && matches!(self.b[stem_len - 1], b's' | b't'))
                {
                    continue;
                }
                if self.measure(stem_len) > 1 {
                    self.b.truncate(stem_len);
                }
                return;
            }
        }
    }

    fn step5(&mut self) {
        if let Some(stem_len) = self.ends("e") {
            let m = self.measure(stem_len);
            if m > 1 || (m == 1 && !self.cvc(stem_len)) {
                self.b.truncate(stem_len);
            }
        }

        let len = self.len();
        if self.b.last() == Some(&b'l') && self.double_cons(len) && self.measure(len) > 1 {
            self.b.pop();
        }
    }
}
