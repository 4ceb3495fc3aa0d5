//! Configuration management for the detection service

use crate::types::prediction::RiskLevelThresholds;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file, optional
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Prefix for environment overrides, e.g. `FAKEJOB__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "FAKEJOB";

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactsConfig,
    pub nlp: NlpConfig,
    pub scoring: ScoringConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Allowed CORS origins; `"*"` allows any origin
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Locations of the pre-trained artifacts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory containing the artifact files
    pub dir: PathBuf,
    /// Classifier file: `.onnx` graph or `.json` linear model
    pub classifier: String,
    /// Fitted TF-IDF vectorizer export
    pub vectorizer: String,
    /// Fitted one-hot encoder export
    pub encoder: String,
    /// Number of intra-op threads for ONNX inference
    pub onnx_threads: usize,
}

impl ArtifactsConfig {
    pub fn classifier_path(&self) -> PathBuf {
        self.dir.join(&self.classifier)
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.dir.join(&self.vectorizer)
    }

    pub fn encoder_path(&self) -> PathBuf {
        self.dir.join(&self.encoder)
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            classifier: "best_model.onnx".to_string(),
            vectorizer: "tfidf_vectorizer.json".to_string(),
            encoder: "onehot_encoder.json".to_string(),
            onnx_threads: 1,
        }
    }
}

/// Linguistic resources configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NlpConfig {
    /// Stopword list (one per line); built-in English list when unset
    pub stopwords_path: Option<PathBuf>,
    /// Lemma lexicon (one word per line)
    pub lexicon_path: Option<PathBuf>,
    /// Use the vectorizer's unigram vocabulary as lemma lexicon
    pub lexicon_from_vocabulary: bool,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            stopwords_path: None,
            lexicon_path: None,
            lexicon_from_vocabulary: true,
        }
    }
}

/// Scoring configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Lower bounds of the risk tiers
    pub risk_levels: RiskLevelThresholds,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file and the environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path (optional) and the environment
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring
            .risk_levels
            .validate()
            .context("Invalid [scoring.risk_levels]")?;
        if self.artifacts.onnx_threads == 0 {
            anyhow::bail!("artifacts.onnx_threads must be at least 1");
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
