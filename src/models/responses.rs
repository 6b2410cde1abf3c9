use serde::{Deserialize, Serialize};
use crate::models::domain::{NeighborhoodRecord, SortKey, SynthesizedReview};

/// Neighborhood record with its derived overall score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborhoodSummary {
    #[serde(flatten)]
    pub record: NeighborhoodRecord,
    #[serde(rename = "overallScore")]
    pub overall_score: f64,
}

/// Response for the neighborhood listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNeighborhoodsResponse {
    pub neighborhoods: Vec<NeighborhoodSummary>,
    #[serde(rename = "sortBy")]
    pub sort_by: SortKey,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for address resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub found: bool,
    pub neighborhood: Option<NeighborhoodSummary>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsResponse {
    pub neighborhood: String,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    pub reviews: Vec<SynthesizedReview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesResponse {
    pub features: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub neighborhoods: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
