//! Artifact loader: classifier, vectorizer and encoder

use crate::config::ArtifactsConfig;
use crate::models::classifier::{Classifier, LinearClassifier, OnnxClassifier};
use crate::models::encoder::OneHotEncoder;
use crate::models::vectorizer::TfidfVectorizer;
use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::{error, info};

/// The three pre-trained artifacts, loaded once
pub struct Artifacts {
    pub classifier: Box<dyn Classifier>,
    pub vectorizer: TfidfVectorizer,
    pub encoder: OneHotEncoder,
}

/// Loader for the pre-trained artifacts
pub struct ArtifactLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ArtifactLoader {
    pub fn new(onnx_threads: usize) -> Self {
        Self { onnx_threads }
    }

    /// Load all artifacts named in the configuration.
    ///
    /// Any missing or unreadable artifact is fatal.
    pub fn load_all(&self, config: &ArtifactsConfig) -> Result<Artifacts> {
        let vectorizer_path = config.vectorizer_path();
        let encoder_path = config.encoder_path();
        let classifier_path = config.classifier_path();

        for (artifact, path) in [
            ("vectorizer", &vectorizer_path),
            ("encoder", &encoder_path),
            ("classifier", &classifier_path),
        ] {
            if !path.is_file() {
                error!(
                    artifact,
                    path = %path.display(),
                    dir = %config.dir.display(),
                    "Artifact file not found"
                );
                anyhow::bail!("{} artifact not found at {}", artifact, path.display());
            }
        }

        let vectorizer = TfidfVectorizer::from_file(&vectorizer_path)?;
        info!(
            path = %vectorizer_path.display(),
            vocabulary = vectorizer.vocabulary_size(),
            "Vectorizer loaded"
        );

        let encoder = OneHotEncoder::from_file(&encoder_path)?;
        info!(
            path = %encoder_path.display(),
            width = encoder.width(),
            handle_unknown = ?encoder.handle_unknown(),
            "Encoder loaded"
        );

        let classifier = self.load_classifier(&classifier_path)?;
        info!(
            path = %classifier_path.display(),
            kind = classifier.kind(),
            n_features = ?classifier.n_features(),
            "Classifier loaded"
        );

        Ok(Artifacts {
            classifier,
            vectorizer,
            encoder,
        })
    }

    /// Pick the classifier implementation from the file extension
    pub fn load_classifier(&self, path: &Path) -> Result<Box<dyn Classifier>> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("onnx") => Ok(Box::new(self.load_onnx(path)?)),
            Some("json") => Ok(Box::new(LinearClassifier::from_file(path)?)),
            other => anyhow::bail!(
                "Unsupported classifier format {:?} for {}",
                other,
                path.display()
            ),
        }
    }

    /// Load an ONNX classifier session
    pub fn load_onnx(&self, path: &Path) -> Result<OnnxClassifier> {
        info!(path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .with_context(|| format!("Failed to load model from {}", path.display()))?;

        let classifier = OnnxClassifier::new(session);
        let (label_output, probability_output) = classifier.output_names();
        info!(
            input = %classifier.input_name(),
            label = ?label_output,
            probabilities = %probability_output,
            "ONNX model loaded"
        );

        Ok(classifier)
    }
}

impl Default for ArtifactLoader {
    fn default() -> Self {
        Self { onnx_threads: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_artifacts_fail_fast() {
        let config = ArtifactsConfig {
            dir: PathBuf::from("does/not/exist"),
            ..Default::default()
        };
        let err = ArtifactLoader::default().load_all(&config).err().unwrap();
        assert!(err.to_string().contains("vectorizer artifact not found"));
    }

    #[test]
    fn test_unsupported_classifier_format() {
        let result = ArtifactLoader::default().load_classifier(Path::new("model.pkl"));
        assert!(result.is_err());
    }

    #[test]
    fn test_loads_fixture_artifacts() {
        let config = ArtifactsConfig {
            dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
            classifier: "linear_model.json".to_string(),
            ..Default::default()
        };
        let artifacts = ArtifactLoader::default().load_all(&config).unwrap();

        assert_eq!(artifacts.classifier.kind(), "linear");
        assert_eq!(
            artifacts.classifier.n_features(),
            Some(artifacts.vectorizer.vocabulary_size() + artifacts.encoder.width() + 3)
        );
    }
}
