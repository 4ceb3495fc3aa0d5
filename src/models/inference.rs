//! Scoring of assembled feature rows

use crate::models::classifier::Classifier;
use crate::types::features::FeatureVector;
use crate::types::prediction::{PredictionResult, RiskLevelThresholds};
use anyhow::Result;
use tracing::debug;

/// Runs the classifier and buckets the fake-class probability into a risk tier
pub struct InferenceEngine {
    classifier: Box<dyn Classifier>,
    thresholds: RiskLevelThresholds,
}

impl InferenceEngine {
    pub fn new(classifier: Box<dyn Classifier>, thresholds: RiskLevelThresholds) -> Self {
        Self {
            classifier,
            thresholds,
        }
    }

    /// Score one feature row
    pub fn score(&self, features: &FeatureVector) -> Result<PredictionResult> {
        let scores = self.classifier.classify(features)?;
        let result =
            PredictionResult::from_probabilities(scores.label, scores.probabilities, &self.thresholds);

        debug!(
            classifier = self.classifier.kind(),
            label = scores.label,
            fake_probability = scores.probabilities[1],
            risk_level = %result.risk_level,
            "Inference complete"
        );

        Ok(result)
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn thresholds(&self) -> &RiskLevelThresholds {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classifier::LinearClassifier;
    use crate::types::features::SparseRow;
    use crate::types::prediction::RiskLevel;

    fn engine(intercept: f64) -> InferenceEngine {
        let classifier = LinearClassifier {
            coef: vec![0.0; 5],
            intercept,
        };
        InferenceEngine::new(Box::new(classifier), RiskLevelThresholds::default())
    }

    fn row(width: usize) -> FeatureVector {
        FeatureVector {
            text: SparseRow::zeros(width),
            categorical: SparseRow::zeros(0),
            numeric: [0.0; 3],
        }
    }

    #[test]
    fn test_probabilities_sum_to_hundred() {
        for intercept in [-6.0, -1.4, -0.2, 0.0, 0.7, 3.0] {
            let result = engine(intercept).score(&row(2)).unwrap();
            assert!((result.fake_probability + result.real_probability - 100.0).abs() < 1e-9);
            assert!(result.confidence >= 50.0 && result.confidence <= 100.0);
            assert_eq!(
                result.confidence,
                result.fake_probability.max(result.real_probability)
            );
        }
    }

    #[test]
    fn test_verdict_and_tier() {
        let real = engine(-3.0).score(&row(2)).unwrap();
        assert!(!real.is_fake);
        assert_eq!(real.risk_level, RiskLevel::Low);

        let fake = engine(3.0).score(&row(2)).unwrap();
        assert!(fake.is_fake);
        assert_eq!(fake.risk_level, RiskLevel::Critical);

        // sigmoid(0) = 0.5, decision not above zero
        let even = engine(0.0).score(&row(2)).unwrap();
        assert!(!even.is_fake);
        assert_eq!(even.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        assert!(engine(0.0).score(&row(7)).is_err());
    }
}
