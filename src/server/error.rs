use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced to HTTP clients as `{"detail": ...}`
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{1}")]
    BadRequest(StatusCode, String),
    #[error("Model artifacts are not loaded")]
    NotLoaded,
    #[error("{0:#}")]
    Inference(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.status(), rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(status, _) => *status,
            ApiError::NotLoaded | ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "rejected request");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::BadRequest(StatusCode::UNPROCESSABLE_ENTITY, "missing field".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::NotLoaded.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::from(anyhow::anyhow!("shape mismatch"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "shape mismatch");
    }
}
