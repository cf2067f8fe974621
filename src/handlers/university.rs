use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::university::{UniversityListResponse, UniversityReadQuery};
use crate::services::university;

/// GET /api/university/read?slug=
pub async fn read_universities_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UniversityReadQuery>, QueryRejection>,
) -> Result<Json<UniversityListResponse>, ApiError> {
    let Query(query) = query?;

    Ok(Json(UniversityListResponse {
        universities: university::read(&state, query.slug.as_deref()),
    }))
}
