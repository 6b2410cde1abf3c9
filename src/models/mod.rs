// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AxisComparison, CommunityInsights, ComponentScores, CrimeAnalysis, CrimeTrend, InsightWeights,
    InsightsReport, MarketStatus, MlInsights, NeighborhoodComparison, NeighborhoodRecord,
    PriceRange, RealEstateSnapshot, ReviewProfile, RiskLevel, ScoreAxis, SortKey,
    SynthesizedReview,
};
pub use requests::{AddressRequest, CompareQuery, ListNeighborhoodsQuery, ReviewsQuery};
pub use responses::{
    ErrorResponse, FeaturesResponse, HealthResponse, ListNeighborhoodsResponse,
    NeighborhoodSummary, ResolveResponse, ReviewsResponse,
};
