//! Process-wide detection context: artifacts loaded once, shared read-only

use crate::config::AppConfig;
use crate::feature_extractor::FeatureExtractor;
use crate::models::inference::InferenceEngine;
use crate::models::loader::ArtifactLoader;
use crate::text::normalizer::TextNormalizer;
use crate::text::resources::LinguisticResources;
use crate::types::job_posting::JobPosting;
use crate::types::prediction::PredictionResult;
use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

/// Feature assembly plus scoring for a single fixed model
pub struct Pipeline {
    extractor: FeatureExtractor,
    engine: InferenceEngine,
}

impl Pipeline {
    pub fn new(extractor: FeatureExtractor, engine: InferenceEngine) -> Self {
        Self { extractor, engine }
    }

    /// Load artifacts and linguistic resources named in the configuration
    pub fn load(config: &AppConfig) -> Result<Self> {
        let artifacts = ArtifactLoader::new(config.artifacts.onnx_threads)
            .load_all(&config.artifacts)?;

        let resources = LinguisticResources::load(&config.nlp, Some(artifacts.vectorizer.terms()))?;
        let normalizer = TextNormalizer::new(resources)?;

        let extractor =
            FeatureExtractor::new(normalizer, artifacts.vectorizer, artifacts.encoder);
        let engine =
            InferenceEngine::new(artifacts.classifier, config.scoring.risk_levels.clone());

        let pipeline = Self::new(extractor, engine);
        pipeline.check_layout();
        Ok(pipeline)
    }

    /// Warn when the declared classifier width disagrees with the row layout
    fn check_layout(&self) {
        let width = self.extractor.feature_count();
        match self.engine.classifier().n_features() {
            Some(expected) if expected != width => warn!(
                expected,
                assembled = width,
                "Classifier input width does not match feature layout"
            ),
            _ => info!(features = width, "Detection pipeline ready"),
        }
    }

    /// Assemble features and score one posting
    pub fn predict(&self, job: &JobPosting) -> Result<PredictionResult> {
        let features = self.extractor.assemble(job)?;
        self.engine.score(&features)
    }

    /// Raw and cleaned text of a posting, with word counts
    pub fn preprocess(&self, job: &JobPosting) -> Preprocessed {
        Preprocessed::new(job.combined_text(), self.extractor.clean_text(job))
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }
}

/// Preview of the text cleaning applied to a posting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preprocessed {
    pub raw_text: String,
    pub cleaned_text: String,
    pub raw_word_count: usize,
    pub cleaned_word_count: usize,
    /// Share of words removed by cleaning, rounded percent
    pub reduction_percent: i64,
}

impl Preprocessed {
    pub fn new(raw_text: String, cleaned_text: String) -> Self {
        let raw_word_count = raw_text.split_whitespace().count();
        let cleaned_word_count = cleaned_text.split_whitespace().count();
        let reduction_percent = if raw_word_count == 0 {
            0
        } else {
            ((1.0 - cleaned_word_count as f64 / raw_word_count as f64) * 100.0).round() as i64
        };

        Self {
            raw_text,
            cleaned_text,
            raw_word_count,
            cleaned_word_count,
            reduction_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocessed_counts() {
        let preview = Preprocessed::new(
            "The best job in the world".to_string(),
            "best job world".to_string(),
        );
        assert_eq!(preview.raw_word_count, 6);
        assert_eq!(preview.cleaned_word_count, 3);
        assert_eq!(preview.reduction_percent, 50);
    }

    #[test]
    fn test_preprocessed_empty() {
        let preview = Preprocessed::new("  ".to_string(), String::new());
        assert_eq!(preview.raw_word_count, 0);
        assert_eq!(preview.reduction_percent, 0);
    }
}
