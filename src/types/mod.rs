//! Type definitions for the detection pipeline

pub mod features;
pub mod job_posting;
pub mod prediction;

pub use features::{FeatureVector, SparseRow};
pub use job_posting::JobPosting;
pub use prediction::{PredictionResult, RiskLevel, RiskLevelThresholds, Verdict};
