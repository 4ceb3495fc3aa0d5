//! Pre-trained artifacts and model inference

pub mod classifier;
pub mod encoder;
pub mod inference;
pub mod loader;
pub mod vectorizer;

pub use classifier::{ClassScores, Classifier, LinearClassifier, OnnxClassifier};
pub use encoder::OneHotEncoder;
pub use inference::InferenceEngine;
pub use loader::{ArtifactLoader, Artifacts};
pub use vectorizer::TfidfVectorizer;
