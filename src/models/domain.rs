use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Neighborhood reference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodRecord {
    pub name: String,
    #[serde(rename = "safetyScore")]
    pub safety_score: f64,
    #[serde(rename = "educationScore")]
    pub education_score: f64,
    #[serde(rename = "transitScore")]
    pub transit_score: f64,
    #[serde(rename = "amenitiesScore")]
    pub amenities_score: f64,
    #[serde(rename = "averagePrice")]
    pub average_price: u64,
    #[serde(rename = "topFeatures", default)]
    pub top_features: Vec<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(rename = "knownIssues", default)]
    pub known_issues: Vec<String>,
    /// Reported incidents over the last reporting period
    #[serde(rename = "recentIncidents", default)]
    pub recent_incidents: u32,
    #[serde(rename = "crimeTrend", default)]
    pub crime_trend: CrimeTrend,
}

impl NeighborhoodRecord {
    /// Value of one sub-score axis
    pub fn score(&self, axis: ScoreAxis) -> f64 {
        match axis {
            ScoreAxis::Safety => self.safety_score,
            ScoreAxis::Education => self.education_score,
            ScoreAxis::Transit => self.transit_score,
            ScoreAxis::Amenities => self.amenities_score,
        }
    }

    pub fn has_features(&self, required: &[String]) -> bool {
        required.iter().all(|tag| self.top_features.contains(tag))
    }
}

/// The four sub-score axes, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreAxis {
    Safety,
    Education,
    Transit,
    Amenities,
}

impl ScoreAxis {
    pub const ALL: [ScoreAxis; 4] = [
        ScoreAxis::Safety,
        ScoreAxis::Education,
        ScoreAxis::Transit,
        ScoreAxis::Amenities,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScoreAxis::Safety => "Safety",
            ScoreAxis::Education => "Education",
            ScoreAxis::Transit => "Transit",
            ScoreAxis::Amenities => "Amenities",
        }
    }
}

/// Sort key for catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Price,
    Safety,
    Education,
    Transit,
    Amenities,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "safety" => Ok(SortKey::Safety),
            "education" => Ok(SortKey::Education),
            "transit" => Ok(SortKey::Transit),
            "amenities" => Ok(SortKey::Amenities),
            other => Err(format!(
                "unknown sort key '{}', expected one of: price, safety, education, transit, amenities",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::Price => "price",
            SortKey::Safety => "safety",
            SortKey::Education => "education",
            SortKey::Transit => "transit",
            SortKey::Amenities => "amenities",
        };
        f.write_str(s)
    }
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, price: u64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self { min: 0, max: 3_000_000 }
    }
}

/// Statistical parameters for review synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewProfile {
    #[serde(rename = "avgRating")]
    pub avg_rating: f64,
    #[serde(rename = "ratingRange")]
    pub rating_range: f64,
    pub tags: Vec<String>,
    #[serde(rename = "helpfulBase")]
    pub helpful_base: u32,
}

impl Default for ReviewProfile {
    fn default() -> Self {
        Self {
            avg_rating: 4.0,
            rating_range: 0.5,
            tags: vec!["General".to_string()],
            helpful_base: 20,
        }
    }
}

/// Mock review generated for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedReview {
    pub id: String,
    pub author: String,
    pub rating: f64,
    pub date: chrono::NaiveDate,
    pub content: String,
    pub tags: Vec<String>,
    pub helpful: u32,
}

/// One axis of a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisComparison {
    pub axis: ScoreAxis,
    pub first: f64,
    pub second: f64,
    pub difference: f64,
}

/// Side-by-side comparison of two neighborhoods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodComparison {
    pub first: String,
    pub second: String,
    pub axes: Vec<AxisComparison>,
    #[serde(rename = "overallDifference")]
    pub overall_difference: f64,
    #[serde(rename = "priceDifference")]
    pub price_difference: i64,
}

/// Real estate market status buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    #[serde(rename = "Hot Market")]
    Hot,
    #[serde(rename = "Seller's Market")]
    Sellers,
    #[serde(rename = "Balanced Market")]
    Balanced,
    #[serde(rename = "Buyer's Market")]
    Buyers,
}

impl MarketStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MarketStatus::Hot => "Hot Market",
            MarketStatus::Sellers => "Seller's Market",
            MarketStatus::Balanced => "Balanced Market",
            MarketStatus::Buyers => "Buyer's Market",
        }
    }
}

/// Estimated real estate snapshot for a neighborhood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealEstateSnapshot {
    pub median_price: String,
    pub price_trend: String,
    pub price_trend_pct: f64,
    pub market_status: MarketStatus,
    pub price_per_sqft: String,
    pub avg_days_on_market: u32,
}

/// Crime risk buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket a 0-10 safety sub-score
    pub fn from_safety_score(score: f64) -> Self {
        if score >= 8.0 {
            RiskLevel::Low
        } else if score >= 6.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Direction of reported incidents over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrimeTrend {
    Decreasing,
    #[default]
    Stable,
    Increasing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeAnalysis {
    pub risk_level: RiskLevel,
    pub safety_score: f64,
    pub trend: CrimeTrend,
    pub comparison: String,
    #[serde(default)]
    pub recent_incidents: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityInsights {
    pub positive_aspects: Vec<String>,
    pub top_complaints: Vec<String>,
}

/// Component scores of the insight score, each 0-100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub safety: f64,
    pub real_estate: f64,
    pub education: f64,
    pub amenities: f64,
    pub community: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlInsights {
    pub overall_score: f64,
    pub component_scores: ComponentScores,
    pub interpretation: String,
    pub recommendations: Vec<String>,
}

/// Full insights report for an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub address: String,
    pub neighborhood: String,
    pub ml_insights: MlInsights,
    pub crime_analysis: CrimeAnalysis,
    pub real_estate: RealEstateSnapshot,
    pub community: CommunityInsights,
}

/// Insight scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightWeights {
    pub safety: f64,
    pub real_estate: f64,
    pub education: f64,
    pub amenities: f64,
    pub community: f64,
}

impl Default for InsightWeights {
    fn default() -> Self {
        Self {
            safety: 0.30,
            real_estate: 0.25,
            education: 0.20,
            amenities: 0.15,
            community: 0.10,
        }
    }
}
