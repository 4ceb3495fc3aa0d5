//! Binary classifiers behind a common scoring seam

use crate::error::FeatureError;
use crate::types::features::FeatureVector;
use anyhow::{Context, Result};
use ort::memory::Allocator;
use ort::session::{Session, SessionOutputs};
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, DynValue, Tensor};
use serde::Deserialize;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Predicted class and the [real, fake] probability pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScores {
    /// 0 = real, 1 = fake
    pub label: u8,
    pub probabilities: [f64; 2],
}

impl ClassScores {
    /// Build scores from raw class probabilities, renormalizing the pair.
    ///
    /// A single value is read as the fake-class probability. When the model
    /// gives no explicit label, the more probable class wins (ties go to real).
    pub fn from_raw(label: Option<i64>, raw: &[f64]) -> Result<Self, FeatureError> {
        let (real, fake) = match raw {
            [fake] => (1.0 - fake, *fake),
            [real, fake, ..] => (*real, *fake),
            [] => return Err(FeatureError::InvalidProbabilities("empty output".into())),
        };

        let sum = real + fake;
        if !(real.is_finite() && fake.is_finite()) || real < 0.0 || fake < 0.0 || sum <= 0.0 {
            return Err(FeatureError::InvalidProbabilities(format!(
                "[{real}, {fake}]"
            )));
        }
        let probabilities = [real / sum, fake / sum];

        let label = match label {
            Some(1) => 1,
            Some(_) => 0,
            None => u8::from(probabilities[1] > probabilities[0]),
        };

        Ok(Self {
            label,
            probabilities,
        })
    }
}

/// A fitted binary classifier over the assembled feature row
pub trait Classifier: Send + Sync {
    /// Short identifier for logs and health output
    fn kind(&self) -> &'static str;

    /// Expected input width, when the model declares it
    fn n_features(&self) -> Option<usize>;

    /// Predicted label and class probabilities for one row
    fn classify(&self, features: &FeatureVector) -> Result<ClassScores>;
}

/// Logistic-regression export: `{"coef": [...], "intercept": b}`
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    pub coef: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearClassifier {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read classifier from {}", path.display()))?;
        let model: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse classifier {}", path.display()))?;
        if model.coef.is_empty() {
            anyhow::bail!("Classifier {} has no coefficients", path.display());
        }
        Ok(model)
    }

    fn decision_function(&self, features: &FeatureVector) -> f64 {
        features
            .iter_nonzero()
            .map(|(col, value)| self.coef[col] * value as f64)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LinearClassifier {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coef.len())
    }

    fn classify(&self, features: &FeatureVector) -> Result<ClassScores> {
        if features.width() != self.coef.len() {
            return Err(FeatureError::ShapeMismatch {
                expected: self.coef.len(),
                actual: features.width(),
            }
            .into());
        }

        let decision = self.decision_function(features);
        let fake = 1.0 / (1.0 + (-decision).exp());
        let label = i64::from(decision > 0.0);

        Ok(ClassScores::from_raw(Some(label), &[1.0 - fake, fake])?)
    }
}

/// ONNX Runtime session exported from the trained classifier
pub struct OnnxClassifier {
    /// Session needs exclusive access while running
    session: Mutex<Session>,
    input_name: String,
    label_output: Option<String>,
    probability_output: String,
}

impl OnnxClassifier {
    pub fn new(session: Session) -> Self {
        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .map(|o| o.name.clone());

        let probability_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob"))
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "probabilities".to_string());

        Self {
            session: Mutex::new(session),
            input_name,
            label_output,
            probability_output,
        }
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn output_names(&self) -> (Option<&str>, &str) {
        (self.label_output.as_deref(), &self.probability_output)
    }

    fn extract_label(&self, outputs: &SessionOutputs) -> Option<i64> {
        let output = outputs.get(self.label_output.as_deref()?)?;
        let (_, data) = output.try_extract_tensor::<i64>().ok()?;
        data.first().copied()
    }

    /// Class probabilities from either a `[1, n_classes]` tensor or the
    /// `seq(map(int64, float))` layout some converters emit
    fn extract_probabilities(&self, outputs: &SessionOutputs) -> Result<Vec<f64>> {
        if let Some(output) = outputs.get(&self.probability_output) {
            if let Some(probs) = Self::probabilities_from_value(output)? {
                return Ok(probs);
            }
        }

        for (name, output) in outputs.iter() {
            if name.contains("label") {
                continue;
            }
            if let Some(probs) = Self::probabilities_from_value(&output)? {
                debug!(output = %name, "Probabilities extracted from fallback output");
                return Ok(probs);
            }
        }

        anyhow::bail!("Classifier produced no probability output")
    }

    fn probabilities_from_value(output: &DynValue) -> Result<Option<Vec<f64>>> {
        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            // Batch of one: the first row holds every class
            return Ok(Some(data.iter().take(2).map(|&p| p as f64).collect()));
        }

        if DynSequenceValueType::can_downcast(&output.dtype()) {
            let allocator = Allocator::default();
            let sequence = output
                .downcast_ref::<DynSequenceValueType>()
                .map_err(|e| anyhow::anyhow!("Failed to downcast to sequence: {}", e))?;
            let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;
            let Some(first) = maps.first() else {
                anyhow::bail!("Empty probability sequence");
            };

            let mut probs = [0.0_f64; 2];
            for (class_id, prob) in first.try_extract_key_values::<i64, f32>()? {
                if let Some(slot) = usize::try_from(class_id).ok().and_then(|i| probs.get_mut(i)) {
                    *slot = prob as f64;
                }
            }
            return Ok(Some(probs.to_vec()));
        }

        Ok(None)
    }
}

impl Classifier for OnnxClassifier {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn n_features(&self) -> Option<usize> {
        None
    }

    fn classify(&self, features: &FeatureVector) -> Result<ClassScores> {
        let dense = features.to_dense();
        let shape = vec![1_i64, dense.len() as i64];
        let input_tensor =
            Tensor::from_array((shape, dense)).context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        let outputs = session.run(ort::inputs![&self.input_name => input_tensor])?;

        let probabilities = self.extract_probabilities(&outputs)?;
        let label = self.extract_label(&outputs);

        Ok(ClassScores::from_raw(label, &probabilities)?)
    }
}
