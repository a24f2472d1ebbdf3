//! Text tokenizer: lowercase, extract word tokens, drop stop words.

use crate::error::{IndexError, Result};
use crate::stopwords::StopWords;
use regex::Regex;
use std::collections::HashSet;

/// Tokens of two or more word characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
    stop_words: HashSet<String>,
}

impl Tokenizer {
    pub fn new(pattern: &str, stop_words: &StopWords) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| IndexError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern,
            stop_words: stop_words.to_set(),
        })
    }

    /// Tokens of `text` in order of appearance, duplicates kept
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }
}
