use axum::http::{Method, Uri};
use tracing::debug;

use crate::core::error::ApiError;

/// Unmatched API routes get the JSON error envelope rather than the SPA shell
pub async fn fallback_handler(method: Method, uri: Uri) -> ApiError {
    debug!(method = %method, path = %uri.path(), "No route matched");
    ApiError::NotFound(format!("Cannot {} {}", method, uri.path()))
}

/// Known path, unsupported method
pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> ApiError {
    debug!(method = %method, path = %uri.path(), "Method not allowed");
    ApiError::MethodNotAllowed(format!("Cannot {} {}", method, uri.path()))
}
