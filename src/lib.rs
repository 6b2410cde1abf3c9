//! Neighborhood Insights - neighborhood scoring, search and insights service
//!
//! The core is a set of pure functions over an immutable [`Catalog`]:
//! address resolution, score aggregation, review synthesis and insight
//! scoring. The `routes` module exposes them over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use self::core::{
    aggregate_and_filter, overall_score, resolve_address, Catalog, CatalogError, InsightScorer,
    RandomSource, ReviewSynthesizer,
};
pub use models::{NeighborhoodRecord, PriceRange, ReviewProfile, SortKey, SynthesizedReview};
