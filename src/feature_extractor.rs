//! Feature assembly for job posting model inference.
//!
//! Builds the classifier input in the exact column layout used during
//! training: TF-IDF text block, one-hot categorical block, numeric flags.

use crate::error::FeatureError;
use crate::models::encoder::OneHotEncoder;
use crate::models::vectorizer::TfidfVectorizer;
use crate::text::normalizer::TextNormalizer;
use crate::types::features::{FeatureVector, NUMERIC_WIDTH};
use crate::types::job_posting::JobPosting;

/// Numeric flag columns, in training order
pub const NUMERIC_COLUMNS: [&str; NUMERIC_WIDTH] =
    ["telecommuting", "has_company_logo", "has_questions"];

/// Transforms job postings into model input rows.
pub struct FeatureExtractor {
    normalizer: TextNormalizer,
    vectorizer: TfidfVectorizer,
    encoder: OneHotEncoder,
}

impl FeatureExtractor {
    pub fn new(
        normalizer: TextNormalizer,
        vectorizer: TfidfVectorizer,
        encoder: OneHotEncoder,
    ) -> Self {
        Self {
            normalizer,
            vectorizer,
            encoder,
        }
    }

    /// Assemble the feature row for one posting
    pub fn assemble(&self, job: &JobPosting) -> Result<FeatureVector, FeatureError> {
        let cleaned = self.clean_text(job);
        let text = self.vectorizer.transform(&cleaned)?;
        let categorical = self.encoder.transform(&job.categorical_values())?;
        let numeric = job.numeric_values();

        Ok(FeatureVector {
            text,
            categorical,
            numeric,
        })
    }

    /// Normalized combined text of the posting
    pub fn clean_text(&self, job: &JobPosting) -> String {
        self.normalizer.normalize(&job.combined_text())
    }

    /// Width of every row produced
    pub fn feature_count(&self) -> usize {
        self.vectorizer.vocabulary_size() + self.encoder.width() + NUMERIC_WIDTH
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::encoder::OneHotArtifact;
    use crate::models::vectorizer::TfidfArtifact;

    fn extractor() -> FeatureExtractor {
        let vectorizer: TfidfArtifact = serde_json::from_value(serde_json::json!({
            "vocabulary": {"work": 0, "home": 1, "earn": 2, "week": 3, "engineer": 4},
            "idf": [1.0, 1.0, 2.0, 1.0, 1.5]
        }))
        .unwrap();
        let encoder: OneHotArtifact = serde_json::from_value(serde_json::json!({
            "categories": [["Full-time", "Unknown"], ["Unknown"], ["Unknown"]],
            "handle_unknown": "ignore"
        }))
        .unwrap();

        FeatureExtractor::new(
            TextNormalizer::english().unwrap(),
            TfidfVectorizer::from_artifact(vectorizer).unwrap(),
            OneHotEncoder::from_artifact(encoder).unwrap(),
        )
    }

    #[test]
    fn test_all_defaults_has_fixed_width() {
        let extractor = extractor();
        let vector = extractor.assemble(&JobPosting::new("", "")).unwrap();

        assert_eq!(extractor.feature_count(), 5 + 4 + 3);
        assert_eq!(vector.width(), extractor.feature_count());
        assert_eq!(vector.text.nnz(), 0);
        // every categorical defaults to "Unknown"
        assert_eq!(vector.categorical.entries(), &[(1, 1.0), (2, 1.0), (3, 1.0)]);
        assert_eq!(vector.numeric, [0.0; 3]);
    }

    #[test]
    fn test_block_order() {
        let extractor = extractor();
        let job = JobPosting {
            employment_type: Some("Full-time".into()),
            has_company_logo: Some(1),
            ..JobPosting::new("Work from home!", "Earn $500 per week")
        };
        let dense = extractor.assemble(&job).unwrap().to_dense();

        assert_eq!(dense.len(), 12);
        assert!(dense[..5].iter().enumerate().all(|(i, &v)| (v > 0.0) == (i != 4)));
        assert_eq!(&dense[5..9], &[1.0, 0.0, 1.0, 1.0]);
        assert_eq!(&dense[9..], &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_clean_text_uses_all_fields() {
        let extractor = extractor();
        let job = JobPosting {
            company_profile: Some("Acme Corp".into()),
            requirements: Some("Typing skills".into()),
            benefits: Some("Bonuses".into()),
            ..JobPosting::new("Clerk", "Data entry")
        };

        assert_eq!(
            extractor.clean_text(&job),
            "clerk acme corp data entry typing skill bonuse"
        );
    }
}
