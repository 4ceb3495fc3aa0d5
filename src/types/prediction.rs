//! Prediction output structures

use serde::{Deserialize, Serialize};

/// Risk tier derived from the fake-class probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Critical,
}

impl RiskLevel {
    /// Determine risk level from a fake-class probability (0.0 - 1.0).
    ///
    /// Each tier includes its lower bound.
    pub fn from_probability(probability: f64, thresholds: &RiskLevelThresholds) -> Self {
        if probability >= thresholds.critical {
            RiskLevel::Critical
        } else if probability >= thresholds.very_high {
            RiskLevel::VeryHigh
        } else if probability >= thresholds.high {
            RiskLevel::High
        } else if probability >= thresholds.moderate {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower bounds of each risk tier above `Low`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLevelThresholds {
    pub moderate: f64,
    pub high: f64,
    pub very_high: f64,
    pub critical: f64,
}

impl RiskLevelThresholds {
    /// Thresholds must be strictly increasing inside (0, 1)
    pub fn validate(&self) -> anyhow::Result<()> {
        let bounds = [self.moderate, self.high, self.very_high, self.critical];
        if bounds.iter().any(|b| !(*b > 0.0 && *b < 1.0)) {
            anyhow::bail!("risk level thresholds must lie in (0, 1): {:?}", self);
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            anyhow::bail!("risk level thresholds must be strictly increasing: {:?}", self);
        }
        Ok(())
    }
}

impl Default for RiskLevelThresholds {
    fn default() -> Self {
        Self {
            moderate: 0.2,
            high: 0.4,
            very_high: 0.6,
            critical: 0.8,
        }
    }
}

/// Verdict label for the predicted class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Fake,
    Real,
}

/// Scored verdict for one job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Classifier predicted the fake class
    pub is_fake: bool,

    /// "FAKE" or "REAL"
    pub prediction: Verdict,

    /// Highest class probability, in percent
    pub confidence: f64,

    /// Fake-class probability, in percent
    pub fake_probability: f64,

    /// Real-class probability, in percent
    pub real_probability: f64,

    /// Risk tier of the fake-class probability
    pub risk_level: RiskLevel,
}

impl PredictionResult {
    /// Build a result from the predicted label and the [real, fake] probability pair
    pub fn from_probabilities(
        label: u8,
        probabilities: [f64; 2],
        thresholds: &RiskLevelThresholds,
    ) -> Self {
        let [real, fake] = probabilities;
        let is_fake = label == 1;

        Self {
            is_fake,
            prediction: if is_fake { Verdict::Fake } else { Verdict::Real },
            confidence: real.max(fake) * 100.0,
            fake_probability: fake * 100.0,
            real_probability: real * 100.0,
            risk_level: RiskLevel::from_probability(fake, thresholds),
        }
    }
}
