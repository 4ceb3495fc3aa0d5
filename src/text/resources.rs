//! Stopword and lexicon resources loaded once at startup

use crate::config::NlpConfig;
use crate::text::lemmatizer::Lemmatizer;
use crate::text::stopwords::ENGLISH_STOPWORDS;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Linguistic resources used by the text normalizer
#[derive(Debug, Clone)]
pub struct LinguisticResources {
    pub stopwords: HashSet<String>,
    pub lemmatizer: Lemmatizer,
}

impl LinguisticResources {
    /// Built-in English stopwords with rule-based lemmatization
    pub fn english() -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Load resources from configuration.
    ///
    /// `vocabulary` supplies the lexicon when `lexicon_from_vocabulary` is set
    /// and no explicit lexicon file is configured.
    pub fn load<'a, I>(config: &NlpConfig, vocabulary: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let stopwords = match &config.stopwords_path {
            Some(path) => read_word_list(path)
                .with_context(|| format!("Failed to read stopwords from {}", path.display()))?,
            None => ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        };

        let lexicon = match (&config.lexicon_path, vocabulary) {
            (Some(path), _) => Some(
                read_word_list(path)
                    .with_context(|| format!("Failed to read lexicon from {}", path.display()))?,
            ),
            (None, Some(terms)) if config.lexicon_from_vocabulary => Some(
                terms
                    .into_iter()
                    .filter(|term| !term.contains(' '))
                    .map(str::to_string)
                    .collect(),
            ),
            _ => None,
        };

        info!(
            stopwords = stopwords.len(),
            lexicon = lexicon.as_ref().map(HashSet::len).unwrap_or(0),
            "Linguistic resources loaded"
        );

        Ok(Self {
            stopwords,
            lemmatizer: match lexicon {
                Some(words) => Lemmatizer::with_lexicon(words),
                None => Lemmatizer::new(),
            },
        })
    }
}

/// One lowercase word per line; blank lines and `#` comments are skipped
fn read_word_list(path: &Path) -> Result<HashSet<String>> {
    let raw = fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_defaults() {
        let resources = LinguisticResources::english();
        assert!(resources.stopwords.contains("the"));
        assert!(!resources.lemmatizer.has_lexicon());
    }

    #[test]
    fn test_lexicon_from_vocabulary_skips_ngrams() {
        let config = NlpConfig::default();
        let resources =
            LinguisticResources::load(&config, Some(["job", "work home", "salary"])).unwrap();

        assert!(resources.lemmatizer.has_lexicon());
        assert_eq!(resources.lemmatizer.lemmatize("jobs"), "job");
        assert_eq!(resources.lemmatizer.lemmatize("homes"), "homes");
    }

    #[test]
    fn test_lexicon_disabled() {
        let config = NlpConfig {
            lexicon_from_vocabulary: false,
            ..Default::default()
        };
        let resources = LinguisticResources::load(&config, Some(["job"])).unwrap();
        assert!(!resources.lemmatizer.has_lexicon());
    }

    #[test]
    fn test_missing_stopword_file() {
        let config = NlpConfig {
            stopwords_path: Some("does/not/exist.txt".into()),
            ..Default::default()
        };
        assert!(LinguisticResources::load(&config, None::<Vec<&str>>).is_err());
    }
}
