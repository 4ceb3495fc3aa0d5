use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::handlers::predict::{indicators, predict, preprocess};
use super::handlers::probes::{health, root};
use super::state::AppState;

pub fn build_routes(state: AppState, cors_allowed_origins: &[String]) -> Result<Router> {
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/api/predict", post(predict))
        .route("/preprocess", post(preprocess))
        .route("/indicators", post(indicators))
        .layer(cors_layer(cors_allowed_origins)?)
        .with_state(state);

    Ok(app)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values = origins
            .iter()
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin {o:?}")))
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
