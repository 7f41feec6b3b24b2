// Tokenization policy shared by the table builder and query lookup.
//
// Fixed and deterministic: lowercase, split on anything that isn't an ASCII
// word character, drop very short tokens, optionally drop English stop words.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

/// Runs of ASCII letters, digits and underscores. Punctuation and whitespace
/// both act as separators.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("static token pattern is valid"));

/// Tokens shorter than this are noise ("a", "s" from "it's", stray digits).
pub const MIN_TOKEN_LEN: usize = 2;

#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Tokenizer {
    /// Tokenizer that removes English stop words.
    pub fn english() -> Self {
        let stop_words: HashSet<String> = get(LANGUAGE::English)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();
        Self { stop_words }
    }

    /// Tokenizer that keeps every word.
    pub fn plain() -> Self {
        Self {
            stop_words: HashSet::new(),
        }
    }

    pub fn with_stop_words(enabled: bool) -> Self {
        if enabled {
            Self::english()
        } else {
            Self::plain()
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Split `text` into normalized tokens, in document order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        WORD.find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|t| t.len() >= MIN_TOKEN_LEN && !self.is_stop_word(t))
            .map(str::to_string)
            .collect()
    }

    /// Map a query word onto the vocabulary the same way document text is
    /// tokenized. Surrounding punctuation is ignored; anything else that
    /// splits the word makes it a compound, which no single term can match.
    pub fn parse_query(&self, word: &str) -> QueryTerm {
        let lower = word.trim().to_lowercase();
        let core = lower.trim_matches(|c: char| c.is_ascii_punctuation());
        let mut tokens = WORD.find_iter(core);
        match (tokens.next(), tokens.next()) {
            (None, _) => QueryTerm::Empty,
            (Some(m), None) if m.as_str() == core => {
                if core.len() >= MIN_TOKEN_LEN {
                    QueryTerm::Term(core.to_string())
                } else {
                    QueryTerm::Empty
                }
            }
            _ => QueryTerm::Compound,
        }
    }

    /// The vocabulary term a query word stands for, if it is exactly one.
    pub fn normalize_query(&self, word: &str) -> Option<String> {
        match self.parse_query(word) {
            QueryTerm::Term(term) => Some(term),
            QueryTerm::Empty | QueryTerm::Compound => None,
        }
    }
}

/// How a query word relates to the token vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTerm {
    /// A single token spanning the whole word.
    Term(String),
    /// Nothing scorable: punctuation only, or a single character.
    Empty,
    /// Several tokens, e.g. "goal puck" or "goal-keeper".
    Compound,
}
