use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored review
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub university_id: String,
    pub user_id: String,
    pub education: f64,
    pub facility: f64,
    pub social: f64,
    pub admin: f64,
    /// Mean of the four sub-ratings, one decimal
    pub overall_rating: f64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Sub-ratings submitted with a review
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ratings {
    pub education: f64,
    pub facility: f64,
    pub social: f64,
    pub admin: f64,
}

impl Ratings {
    pub fn overall(&self) -> f64 {
        round_one_decimal((self.education + self.facility + self.social + self.admin) / 4.0)
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Colour band used by the front-end to tint stars and rating badges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingBand {
    Green,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl RatingBand {
    pub fn for_rating(rating: f64) -> Self {
        if rating >= 4.0 {
            RatingBand::Green
        } else if rating >= 3.0 {
            RatingBand::Yellow
        } else if rating >= 2.0 {
            RatingBand::Orange
        } else if rating >= 1.0 {
            RatingBand::Red
        } else {
            RatingBand::Gray
        }
    }
}

/// Review as rendered on the university page
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    /// e.g. "March 4, 2024"
    pub formatted_date: String,
    pub rating_band: RatingBand,
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        let formatted_date = review.created_at.format("%B %-d, %Y").to_string();
        let rating_band = RatingBand::for_rating(review.overall_rating);
        Self {
            review,
            formatted_date,
            rating_band,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub university_id: Option<String>,
    pub education: Option<f64>,
    pub facility: Option<f64>,
    pub social: Option<f64>,
    pub admin: Option<f64>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateReviewResponse {
    pub success: bool,
    pub message: String,
    pub review: Review,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReadQuery {
    pub university_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewView>,
}
