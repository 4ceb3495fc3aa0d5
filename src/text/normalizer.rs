//! Text cleaning applied to job posting text before vectorization.
//!
//! The steps mirror the preprocessing used when the vectorizer was fitted,
//! so their order matters:
//!
//! 1. lowercase
//! 2. strip URLs and email-like tokens
//! 3. drop everything that is not an ASCII letter or whitespace
//! 4. collapse whitespace
//! 5. tokenize
//! 6. drop stopwords and tokens shorter than three characters, lemmatize the rest
//! 7. rejoin with single spaces

use crate::text::lemmatizer::Lemmatizer;
use crate::text::resources::LinguisticResources;
use crate::text::tokenizer::Tokenizer;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;

const URL_PATTERN: &str = r"http\S+|www\S+|https\S+";
const EMAIL_PATTERN: &str = r"\S+@\S+";
const NON_ALPHA_PATTERN: &str = r"[^a-zA-Z\s]";

/// Minimum token length kept after cleaning
pub const MIN_TOKEN_LEN: usize = 3;

/// Deterministic text normalizer
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    url: Regex,
    email: Regex,
    non_alpha: Regex,
    tokenizer: Tokenizer,
    stopwords: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl TextNormalizer {
    /// Build a normalizer over the given linguistic resources
    pub fn new(resources: LinguisticResources) -> Result<Self> {
        Ok(Self {
            url: Regex::new(URL_PATTERN).context("Invalid URL pattern")?,
            email: Regex::new(EMAIL_PATTERN).context("Invalid email pattern")?,
            non_alpha: Regex::new(NON_ALPHA_PATTERN).context("Invalid character filter")?,
            tokenizer: Tokenizer::new(),
            stopwords: resources.stopwords,
            lemmatizer: resources.lemmatizer,
        })
    }

    /// Normalizer with the built-in English stopwords and rule-based lemmatization
    pub fn english() -> Result<Self> {
        Self::new(LinguisticResources::english())
    }

    /// Replace the tokenization strategy
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Clean raw text into space-separated lemmas
    pub fn normalize(&self, raw: &str) -> String {
        let text = raw.to_lowercase();
        let text = self.url.replace_all(&text, "");
        let text = self.email.replace_all(&text, "");
        let text = self.non_alpha.replace_all(&text, "");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

        self.tokenizer
            .tokenize(&text)
            .into_iter()
            .filter(|token| token.len() >= MIN_TOKEN_LEN && !self.stopwords.contains(*token))
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Clean optional text; absent input yields an empty string
    pub fn normalize_opt(&self, raw: Option<&str>) -> String {
        raw.map(|text| self.normalize(text)).unwrap_or_default()
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }
}
