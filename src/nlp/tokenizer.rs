//! Word tokenization
//!
//! Documents are lowercased (unless case is preserved) and split into runs of two or more word
//! characters (`\b\w\w+\b`, Unicode-aware). Single-character words and
//! punctuation never become tokens.

use regex::Regex;
use std::sync::OnceLock;

/// Default token pattern: two or more word characters
pub const WORD_PATTERN: &str = r"(?u)\b\w\w+\b";

fn word_regex() -> &'static Regex {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();
    WORD_RE.get_or_init(|| Regex::new(WORD_PATTERN).expect("WORD_PATTERN is a valid regex"))
}

/// A word tokenizer, lowercasing by default
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    /// Keep the original case instead of folding to lowercase
    preserve_case: bool,
}

impl Tokenizer {
    /// Create a new tokenizer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep original case instead of lowercasing
    pub fn with_preserve_case(mut self, preserve_case: bool) -> Self {
        self.preserve_case = preserve_case;
        self
    }

    /// Split text into word tokens, in document order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        if self.preserve_case {
            return Self::words(text).map(str::to_string).collect();
        }
        let lower = text.to_lowercase();
        Self::words(&lower).map(str::to_string).collect()
    }

    fn words(text: &str) -> impl Iterator<Item = &str> {
        word_regex().find_iter(text).map(|m| m.as_str())
    }
}
