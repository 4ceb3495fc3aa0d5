//! TF-IDF vectorizer over a pre-fitted vocabulary

use crate::error::FeatureError;
use crate::types::features::SparseRow;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Row normalization applied after idf weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Exported state of a fitted TF-IDF vectorizer
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfArtifact {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    #[serde(default)]
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default = "default_true")]
    pub use_idf: bool,
    /// Stop words applied by the vectorizer's own analyzer
    #[serde(default)]
    pub stop_words: Vec<String>,
}

/// TF-IDF transform with the fitted vocabulary; never refits
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    lowercase: bool,
    token_pattern: Regex,
    sublinear_tf: bool,
    norm: Option<Norm>,
    use_idf: bool,
    stop_words: HashSet<String>,
}

impl TfidfVectorizer {
    /// Load a vectorizer export from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vectorizer from {}", path.display()))?;
        let artifact: TfidfArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse vectorizer {}", path.display()))?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self> {
        let width = artifact.vocabulary.len();
        if width == 0 {
            anyhow::bail!("Vectorizer vocabulary is empty");
        }

        let mut seen = vec![false; width];
        for (term, &col) in &artifact.vocabulary {
            if col >= width || std::mem::replace(&mut seen[col], true) {
                anyhow::bail!("Vectorizer vocabulary index {col} for '{term}' is out of range or duplicated");
            }
        }

        if artifact.use_idf && artifact.idf.len() != width {
            anyhow::bail!(
                "Vectorizer idf has {} entries, vocabulary has {}",
                artifact.idf.len(),
                width
            );
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            anyhow::bail!("Invalid ngram_range ({min_n}, {max_n})");
        }

        let token_pattern = Regex::new(&artifact.token_pattern)
            .with_context(|| format!("Invalid token_pattern {:?}", artifact.token_pattern))?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            lowercase: artifact.lowercase,
            token_pattern,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            use_idf: artifact.use_idf,
            stop_words: artifact.stop_words.into_iter().collect(),
        })
    }

    /// Number of output columns
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vocabulary terms, in no particular order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    /// Analyzer: lowercase, tokenize, drop stop words, expand n-grams
    fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            grams.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        grams
    }

    /// Transform one document into a TF-IDF weighted sparse row
    pub fn transform(&self, text: &str) -> Result<SparseRow, FeatureError> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for gram in self.analyze(text) {
            if let Some(&col) = self.vocabulary.get(&gram) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut weights: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                let idf = if self.use_idf { self.idf[col] } else { 1.0 };
                (col, tf * idf)
            })
            .collect();

        let norm = match self.norm {
            Some(Norm::L2) => weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => weights.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            weights.iter_mut().for_each(|(_, w)| *w /= norm);
        }

        if weights.iter().any(|(_, w)| !w.is_finite()) {
            return Err(FeatureError::NonFinite("text"));
        }

        Ok(SparseRow::from_entries(
            self.vocabulary_size(),
            weights.into_iter().map(|(col, w)| (col, w as f32)).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> TfidfArtifact {
        serde_json::from_str(
            r#"{
                "vocabulary": {"work": 0, "home": 1, "earn": 2, "engineer": 3, "work home": 4},
                "idf": [1.5, 2.0, 3.0, 1.2, 4.0],
                "ngram_range": [1, 2]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_transform_l2_normalized() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).unwrap();
        let row = vectorizer.transform("work home unknownword").unwrap();

        assert_eq!(row.width(), 5);
        let cols: Vec<usize> = row.entries().iter().map(|&(c, _)| c).collect();
        assert_eq!(cols, vec![0, 1, 4]);

        let norm: f32 = row.entries().iter().map(|&(_, v)| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);

        // raw weights 1.5, 2.0, 4.0
        let expected = 4.0 / (1.5f64 * 1.5 + 4.0 + 16.0).sqrt();
        assert!((row.entries()[2].1 as f64 - expected).abs() < 1e-5);
    }

    #[test]
    fn test_empty_text_is_zero_row() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).unwrap();
        let row = vectorizer.transform("").unwrap();
        assert_eq!(row.nnz(), 0);
        assert_eq!(row.width(), 5);
    }

    #[test]
    fn test_sublinear_without_norm() {
        let mut artifact = artifact();
        artifact.sublinear_tf = true;
        artifact.norm = None;
        let vectorizer = TfidfVectorizer::from_artifact(artifact).unwrap();

        let row = vectorizer.transform("earn earn earn").unwrap();
        let expected = (1.0 + 3f64.ln()) * 3.0;
        assert_eq!(row.entries().len(), 1);
        assert!((row.entries()[0].1 as f64 - expected).abs() < 1e-5);
    }

    #[test]
    fn test_vectorizer_stop_words_and_case() {
        let mut artifact = artifact();
        artifact.stop_words = vec!["home".to_string()];
        artifact.norm = None;
        artifact.use_idf = false;
        let vectorizer = TfidfVectorizer::from_artifact(artifact).unwrap();

        let row = vectorizer.transform("WORK Home").unwrap();
        assert_eq!(row.entries(), &[(0, 1.0)]);
    }

    #[test]
    fn test_rejects_inconsistent_artifact() {
        let mut short_idf = artifact();
        short_idf.idf.pop();
        assert!(TfidfVectorizer::from_artifact(short_idf).is_err());

        let mut bad_index = artifact();
        bad_index.vocabulary.insert("remote".to_string(), 9);
        assert!(TfidfVectorizer::from_artifact(bad_index).is_err());
    }
}
