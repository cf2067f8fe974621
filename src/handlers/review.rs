use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::session::AuthUser;
use crate::models::review::{CreateReviewRequest, CreateReviewResponse, ReviewListResponse, ReviewReadQuery};
use crate::services::review;

/// POST /api/review/create (session cookie required)
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create_review_handler(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let created = review::create(&state, &user.id, req)?;

    let body = CreateReviewResponse {
        success: true,
        message: "Review created".to_string(),
        review: (*created).clone(),
    };

    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// GET /api/review/read?universityId=
pub async fn read_reviews_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ReviewReadQuery>, QueryRejection>,
) -> Result<Json<ReviewListResponse>, ApiError> {
    let Query(query) = query?;
    let reviews = review::read(&state, query.university_id.as_deref())?;

    Ok(Json(ReviewListResponse { reviews }))
}
