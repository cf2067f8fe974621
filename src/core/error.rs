// Centralized error handling for the API

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Errors surfaced by request handlers
///
/// Every variant renders as the same JSON envelope:
/// `{"success": false, "statusCode": <code>, "message": <text>}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized() -> Self {
        ApiError::Authentication("Unauthorized".to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let ApiError::Internal(ref cause) = self {
            error!(error = %cause, "Request failed with internal error");
        }

        (
            status,
            Json(ErrorResponse {
                success: false,
                status_code: status.as_u16(),
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

// Malformed bodies and query strings use the same envelope as every other failure
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Errors raised by the document stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate value for unique field '{field}'")]
    Duplicate { field: &'static str },

    #[error("Review already exists for this user and university")]
    DuplicateReview,

    #[error("Failed to persist change: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => {
                ApiError::Conflict(format!("A user with that {} already exists", field))
            }
            StoreError::DuplicateReview => {
                ApiError::Conflict("You have already reviewed this university".to_string())
            }
            StoreError::Persistence(e) => ApiError::Internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn envelope(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let (parts, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        (parts.status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_envelope() {
        let (status, body) = envelope(ApiError::Validation("All fields are required".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.status_code, 400);
        assert_eq!(body.message, "All fields are required");
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let (status, body) = envelope(ApiError::Internal(anyhow::anyhow!("disk on fire"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status_code, 500);
        assert_eq!(body.message, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_duplicate_maps_to_conflict() {
        let err: ApiError = StoreError::Duplicate { field: "email" }.into();
        let (status, body) = envelope(err).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.message, "A user with that email already exists");
    }

    #[test]
    fn test_envelope_uses_camel_case() {
        let json = serde_json::to_value(ErrorResponse {
            success: false,
            status_code: 401,
            message: "Unauthorized".to_string(),
        })
        .unwrap();

        assert_eq!(json["statusCode"], 401);
        assert!(json.get("status_code").is_none());
    }
}
