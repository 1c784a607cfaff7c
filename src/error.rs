//! Error handling for the ATS analyzer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Report rendering error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AtsAnalyzerError>;

impl From<anyhow::Error> for AtsAnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        AtsAnalyzerError::Internal(err.to_string())
    }
}

/// Maps crate errors to HTTP responses so handlers can return
/// `Result<T, AtsAnalyzerError>` directly.
impl IntoResponse for AtsAnalyzerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AtsAnalyzerError::Input(msg) => {
                (StatusCode::BAD_REQUEST, "INPUT_ERROR", msg.clone())
            }
            AtsAnalyzerError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AtsAnalyzerError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone())
            }
            AtsAnalyzerError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Report rendering failed".to_string(),
                )
            }
            AtsAnalyzerError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "A configuration error occurred".to_string(),
                )
            }
            other => {
                tracing::error!("Internal error: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_maps_to_400() {
        let resp = AtsAnalyzerError::Input("job description is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let resp = AtsAnalyzerError::NotFound("analysis abc".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_extraction_maps_to_422() {
        let resp = AtsAnalyzerError::Extraction("bad pdf".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
