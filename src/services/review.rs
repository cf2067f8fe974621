use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::error::{ApiError, StoreError};
use crate::core::state::AppState;
use crate::models::review::{round_one_decimal, CreateReviewRequest, Review, ReviewView};
use crate::models::university::University;
use crate::utils::id::new_id;
use crate::validation::review::validate_review;
use crate::wal::wal::WalOperation;

/// Create a review authored by `author_id` and refresh the university's
/// rating aggregates
pub fn create(
    state: &AppState,
    author_id: &str,
    req: CreateReviewRequest,
) -> Result<Arc<Review>, ApiError> {
    let input = validate_review(req)?;

    if state.users.get(author_id).is_none() {
        return Err(ApiError::unauthorized());
    }

    if state.universities.get(&input.university_id).is_none() {
        return Err(ApiError::NotFound("University not found".to_string()));
    }

    let review = Review {
        id: new_id(),
        university_id: input.university_id,
        user_id: author_id.to_string(),
        education: input.ratings.education,
        facility: input.ratings.facility,
        social: input.ratings.social,
        admin: input.ratings.admin,
        overall_rating: input.ratings.overall(),
        content: input.content,
        created_at: Utc::now(),
    };

    let review = state.reviews.insert(review)?;

    if let Err(e) = state.wal.log_operation(&WalOperation::InsertReview((*review).clone())) {
        state.reviews.remove(&review.id);
        return Err(StoreError::Persistence(e).into());
    }

    info!(
        review_id = %review.id,
        university_id = %review.university_id,
        user_id = %review.user_id,
        overall_rating = review.overall_rating,
        "Review created"
    );

    // The review is committed at this point; stale aggregates are corrected
    // by the next successful refresh for this university
    if let Err(e) = refresh_aggregates(state, &review.university_id) {
        warn!(
            university_id = %review.university_id,
            error = ?e,
            "Failed to refresh university aggregates"
        );
    }

    Ok(review)
}

/// All reviews for a university, newest first, with display fields
pub fn read(state: &AppState, university_id: Option<&str>) -> Result<Vec<ReviewView>, ApiError> {
    let university_id = university_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Validation("universityId is required".to_string()))?;

    Ok(state
        .reviews
        .list_by_university(university_id)
        .into_iter()
        .map(|review| ReviewView::from((*review).clone()))
        .collect())
}

/// Recompute the four sub-rating means, the overall mean and the review
/// count of a university from its reviews
pub fn refresh_aggregates(state: &AppState, university_id: &str) -> Result<Arc<University>, ApiError> {
    // Serializes read-compute-write so concurrent creates cannot lose an update
    let _guard = state
        .catalog_lock
        .lock()
        .map_err(|_| anyhow::anyhow!("Catalog lock poisoned"))?;

    let current = state
        .universities
        .get(university_id)
        .ok_or_else(|| ApiError::NotFound("University not found".to_string()))?;

    let reviews = state.reviews.list_by_university(university_id);
    let updated = with_aggregates(&current, &reviews);

    state
        .wal
        .log_operation(&WalOperation::UpsertUniversity(updated.clone()))
        .map_err(StoreError::Persistence)?;

    Ok(state.universities.upsert(updated))
}

fn with_aggregates(university: &University, reviews: &[Arc<Review>]) -> University {
    let mut updated = university.clone();
    updated.total_ratings = reviews.len() as u32;

    if reviews.is_empty() {
        updated.overall_rating = 0.0;
        updated.education_rating = 0.0;
        updated.facility_rating = 0.0;
        updated.social_rating = 0.0;
        updated.admin_rating = 0.0;
        return updated;
    }

    let mean = |f: fn(&Review) -> f64| {
        round_one_decimal(reviews.iter().map(|r| f(r)).sum::<f64>() / reviews.len() as f64)
    };

    updated.education_rating = mean(|r| r.education);
    updated.facility_rating = mean(|r| r.facility);
    updated.social_rating = mean(|r| r.social);
    updated.admin_rating = mean(|r| r.admin);
    updated.overall_rating = mean(|r| r.overall_rating);
    updated
}
