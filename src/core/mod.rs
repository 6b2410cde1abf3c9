// Core algorithm exports
pub mod aggregator;
pub mod catalog;
pub mod insights;
pub mod market;
pub mod random;
pub mod resolver;
pub mod reviews;

pub use aggregator::{aggregate_and_filter, compare, filter, overall_score, sort};
pub use catalog::{Catalog, CatalogError};
pub use insights::{crime_analysis, InsightScorer};
pub use random::RandomSource;
pub use resolver::resolve_address;
pub use reviews::ReviewSynthesizer;
