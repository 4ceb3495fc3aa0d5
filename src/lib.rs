//! Fake Job Posting Detection
//!
//! Serves a pre-trained TF-IDF text classifier that flags fraudulent job
//! postings: text cleaning, feature assembly, scoring and risk bucketing.

pub mod cli;
pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod indicators;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod text;
pub mod types;

pub use config::AppConfig;
pub use feature_extractor::FeatureExtractor;
pub use models::inference::InferenceEngine;
pub use pipeline::Pipeline;
pub use text::TextNormalizer;
pub use types::{JobPosting, PredictionResult, RiskLevel};
