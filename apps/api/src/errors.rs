use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Document-shape problems (missing fields, unknown templates) never become an
/// `AppError`: they are recovered during normalization and only logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("{backend} backend failed: {reason}")]
    RenderBackend {
        backend: &'static str,
        reason: String,
    },

    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::RenderBackend { backend, reason } => {
                tracing::error!(backend, "Render backend failure: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_BACKEND_FAILURE",
                    self.to_string(),
                )
            }
            AppError::ImageProcessing(msg) => {
                tracing::error!("Image processing failure: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "IMAGE_PROCESSING_FAILURE",
                    msg.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
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
    fn test_render_backend_maps_to_500_with_code() {
        let err = AppError::RenderBackend {
            backend: "export",
            reason: "bad image".to_string(),
        };
        assert_eq!(err.to_string(), "export backend failed: bad image");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_image_processing_maps_to_422() {
        let response = AppError::ImageProcessing("decode".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
