use crate::core::error::ApiError;
use crate::models::review::{round_one_decimal, CreateReviewRequest, Ratings};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;
pub const MAX_CONTENT_LENGTH: usize = 2000;

#[derive(Debug)]
pub struct ValidatedReview {
    pub university_id: String,
    pub ratings: Ratings,
    pub content: String,
}

pub fn validate_review(req: CreateReviewRequest) -> Result<ValidatedReview, ApiError> {
    let university_id = req
        .university_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Validation("University is required".to_string()))?;

    let ratings = Ratings {
        education: rating("education", req.education)?,
        facility: rating("facility", req.facility)?,
        social: rating("social", req.social)?,
        admin: rating("admin", req.admin)?,
    };

    let content = req.content.trim().to_string();
    if content.is_empty() {
        return Err(ApiError::Validation("Review content is required".to_string()));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(ApiError::Validation(format!(
            "Review content must be at most {} characters long",
            MAX_CONTENT_LENGTH
        )));
    }

    Ok(ValidatedReview {
        university_id,
        ratings,
        content,
    })
}

fn rating(name: &str, value: Option<f64>) -> Result<f64, ApiError> {
    let value = value.ok_or_else(|| ApiError::Validation(format!("{} rating is required", capitalize(name))))?;

    if !value.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(ApiError::Validation(format!(
            "{} rating must be between 0 and 5",
            capitalize(name)
        )));
    }

    Ok(round_one_decimal(value))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req() -> CreateReviewRequest {
        CreateReviewRequest {
            university_id: Some("65f0c0ffee0000000000beef".to_string()),
            education: Some(4.0),
            facility: Some(3.5),
            social: Some(5.0),
            admin: Some(2.0),
            content: "  Solid programs, slow registrar.  ".to_string(),
        }
    }

    #[test]
    fn test_valid_review() {
        let ok = validate_review(req()).unwrap();
        assert_eq!(ok.ratings.facility, 3.5);
        assert_eq!(ok.content, "Solid programs, slow registrar.");
    }

    #[test]
    fn test_ratings_rounded_to_one_decimal() {
        let mut r = req();
        r.education = Some(4.26);
        assert_eq!(validate_review(r).unwrap().ratings.education, 4.3);
    }

    #[test]
    fn test_rating_out_of_range() {
        let mut r = req();
        r.social = Some(6.0);
        assert!(matches!(validate_review(r), Err(ApiError::Validation(m)) if m == "Social rating must be between 0 and 5"));

        let mut r = req();
        r.admin = Some(-1.0);
        assert!(validate_review(r).is_err());

        let mut r = req();
        r.admin = Some(f64::NAN);
        assert!(validate_review(r).is_err());
    }

    #[test]
    fn test_missing_rating() {
        let mut r = req();
        r.education = None;
        assert!(matches!(validate_review(r), Err(ApiError::Validation(m)) if m == "Education rating is required"));
    }

    #[test]
    fn test_blank_content() {
        let mut r = req();
        r.content = "   ".to_string();
        assert!(validate_review(r).is_err());
    }

    #[test]
    fn test_content_too_long() {
        let mut r = req();
        r.content = "a".repeat(MAX_CONTENT_LENGTH + 1);
        assert!(validate_review(r).is_err());
    }

    #[test]
    fn test_missing_university() {
        let mut r = req();
        r.university_id = None;
        assert!(validate_review(r).is_err());
    }
}
