use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::server::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "online",
        "message": "Fake Job Posting Detection API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "predict": "POST /predict",
            "preprocess": "POST /preprocess",
            "indicators": "POST /indicators",
            "health": "GET /health"
        }
    }))
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub model_loaded: bool,
    pub vectorizer_loaded: bool,
    pub encoder_loaded: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    // Artifacts load together or not at all
    let loaded = state.is_loaded();
    tracing::debug!(loaded, "health probe");
    Json(Health {
        status: if loaded { "healthy" } else { "degraded" },
        model_loaded: loaded,
        vectorizer_loaded: loaded,
        encoder_loaded: loaded,
    })
}
