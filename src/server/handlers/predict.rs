use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use crate::indicators::{self, Indicator};
use crate::pipeline::Preprocessed;
use crate::server::error::{ApiError, Result};
use crate::server::state::AppState;
use crate::types::{JobPosting, PredictionResult};

pub async fn predict(
    State(state): State<AppState>,
    payload: std::result::Result<Json<JobPosting>, JsonRejection>,
) -> Result<Json<PredictionResult>> {
    let Json(job) = payload?;
    let pipeline = state.pipeline.as_ref().ok_or(ApiError::NotLoaded)?;

    let result = pipeline.predict(&job)?;
    tracing::debug!(
        prediction = ?result.prediction,
        fake_probability = result.fake_probability,
        risk_level = %result.risk_level,
        "posting scored"
    );
    Ok(Json(result))
}

pub async fn preprocess(
    State(state): State<AppState>,
    payload: std::result::Result<Json<JobPosting>, JsonRejection>,
) -> Result<Json<Preprocessed>> {
    let Json(job) = payload?;
    let pipeline = state.pipeline.as_ref().ok_or(ApiError::NotLoaded)?;
    Ok(Json(pipeline.preprocess(&job)))
}

#[derive(Debug, Serialize)]
pub struct IndicatorReport {
    pub flags: usize,
    pub indicators: Vec<Indicator>,
}

pub async fn indicators(
    payload: std::result::Result<Json<JobPosting>, JsonRejection>,
) -> Result<Json<IndicatorReport>> {
    let Json(job) = payload?;
    let found = indicators::detect(&job.combined_text());
    Ok(Json(IndicatorReport {
        flags: found.len(),
        indicators: found,
    }))
}
