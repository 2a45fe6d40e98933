use std::collections::HashSet;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Stopword entries, stored in canonical form so membership checks are exact.
pub type StopwordSet = HashSet<String>;

/// Text normalization capability used by the pipeline.
///
/// `canonicalize` must be idempotent: feeding its own output back in returns
/// the same string. Both methods accept empty input and never panic.
pub trait Normalizer {
    /// Splits raw text into word tokens, dropping punctuation and symbols.
    fn tokenize(&self, raw: &str) -> Vec<String>;

    /// Maps text to its canonical form for comparison and storage.
    fn canonicalize(&self, raw: &str) -> String;
}

// Letters, combining marks, digits, and ZWNJ. The joiner keeps compound
// Persian words such as "می‌روم" in one token instead of two.
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{M}\p{N}\x{200C}]+").unwrap());

/// Normalizer tuned for Persian chat text with mixed-in Latin.
///
/// Canonicalization runs NFC, unifies Arabic-presentation letters to their
/// Persian forms, strips tatweel and short vowel marks, lowercases, and
/// collapses whitespace runs to single spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersianNormalizer;

impl PersianNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Normalizer for PersianNormalizer {
    fn tokenize(&self, raw: &str) -> Vec<String> {
        WORD.find_iter(raw).map(|m| m.as_str().to_string()).collect()
    }

    fn canonicalize(&self, raw: &str) -> String {
        let unified: String = raw.nfc().filter_map(unify_char).collect();
        unified.to_lowercase().split_whitespace().join(" ")
    }
}

/// Maps Arabic codepoints to Persian equivalents; returns None for marks
/// that carry no lexical content.
fn unify_char(c: char) -> Option<char> {
    match c {
        'ي' | 'ى' => Some('ی'),
        'ك' => Some('ک'),
        'ة' => Some('ه'),
        '\u{0640}' => None,                 // tatweel
        '\u{064B}'..='\u{0652}' => None,    // harakat
        _ => Some(c),
    }
}
