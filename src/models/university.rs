use serde::{Deserialize, Serialize};

/// A university in the catalog, including its rating aggregates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub overall_rating: f64,
    #[serde(default)]
    pub education_rating: f64,
    #[serde(default)]
    pub facility_rating: f64,
    #[serde(default)]
    pub social_rating: f64,
    #[serde(default)]
    pub admin_rating: f64,
    #[serde(default)]
    pub total_ratings: u32,
}

/// Catalog seed entry; ids are assigned on load when absent
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversitySeed {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub slug: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Deserialize)]
pub struct UniversityReadQuery {
    pub slug: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UniversityListResponse {
    pub universities: Vec<University>,
}
