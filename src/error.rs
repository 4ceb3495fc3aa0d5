//! Request-time pipeline errors

/// Failures while turning a posting into a feature row or scoring it
#[derive(thiserror::Error, Debug)]
pub enum FeatureError {
    #[error("Found unknown category '{value}' in column '{column}' during transform")]
    UnknownCategory { column: String, value: String },
    #[error("X has {actual} features, but the classifier is expecting {expected} features as input")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("non-finite values in {0} features")]
    NonFinite(&'static str),
    #[error("classifier returned unusable probabilities: {0}")]
    InvalidProbabilities(String),
}
