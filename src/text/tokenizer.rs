//! Word tokenization with an explicit whitespace fallback

use regex::Regex;
use tracing::warn;

const WORD_PATTERN: &str = r"[A-Za-z]+";

/// Tokenization strategy.
///
/// `Word` extracts alphabetic runs; `Whitespace` splits on whitespace. On
/// cleaned text (letters and spaces only) both produce the same tokens.
#[derive(Debug, Clone)]
pub enum Tokenizer {
    Word(Regex),
    Whitespace,
}

impl Tokenizer {
    /// Word tokenizer, falling back to whitespace splitting if the pattern
    /// cannot be compiled
    pub fn new() -> Self {
        match Regex::new(WORD_PATTERN) {
            Ok(re) => Tokenizer::Word(re),
            Err(e) => {
                warn!(error = %e, "Word tokenizer unavailable, using whitespace tokenizer");
                Tokenizer::Whitespace
            }
        }
    }

    pub fn whitespace() -> Self {
        Tokenizer::Whitespace
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            Tokenizer::Word(re) => re.find_iter(text).map(|m| m.as_str()).collect(),
            Tokenizer::Whitespace => text.split_whitespace().collect(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Tokenizer::Whitespace)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies_agree_on_clean_text() {
        let text = "senior rust engineer remote friendly team";
        let word = Tokenizer::new();
        let ws = Tokenizer::whitespace();

        assert!(!word.is_fallback());
        assert!(ws.is_fallback());
        assert_eq!(word.tokenize(text), ws.tokenize(text));
        assert_eq!(word.tokenize(text).len(), 6);
    }

    #[test]
    fn test_word_tokenizer_skips_punctuation() {
        let tokens = Tokenizer::new().tokenize("hello, world!");
        assert_eq!(tokens, vec!["hello", "world"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(Tokenizer::new().tokenize("").is_empty());
        assert!(Tokenizer::whitespace().tokenize("   ").is_empty());
    }
}
