// Integration tests for Neighborhood Insights

use neighborhood_insights::core::{
    aggregate_and_filter, catalog::Catalog, resolve_address, InsightScorer, ReviewSynthesizer,
};
use neighborhood_insights::models::{PriceRange, SortKey};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;

#[test]
fn test_integration_search_filter_sort() {
    let catalog = Catalog::sample();

    let found = resolve_address("123 Valencia St, San Francisco, CA", &catalog)
        .expect("address should resolve");
    assert_eq!(found.name, "Mission District");
    assert_eq!(found.average_price, 1_200_000);

    let results = aggregate_and_filter(
        &catalog,
        PriceRange::new(1_000_000, 1_500_000),
        &[],
        SortKey::Safety,
    );
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();

    assert!(names.contains(&"Mission District"));
    // North Beach 8.5, Financial District 8.0, Mission District 6.8
    assert_eq!(names, vec!["North Beach", "Financial District", "Mission District"]);

    for pair in results.windows(2) {
        assert!(pair[0].safety_score >= pair[1].safety_score);
    }
}

#[test]
fn test_integration_feature_filter() {
    let catalog = Catalog::sample();
    let vocabulary = catalog.feature_vocabulary();
    assert!(vocabulary.contains(&"Food Scene".to_string()));

    let results = aggregate_and_filter(
        &catalog,
        PriceRange::default(),
        &["Food Scene".to_string(), "Nightlife".to_string()],
        SortKey::Price,
    );
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Mission District");

    let none = aggregate_and_filter(
        &catalog,
        PriceRange::default(),
        &["Food Scene".to_string(), "Bay Views".to_string()],
        SortKey::Price,
    );
    assert!(none.is_empty());
}

#[test]
fn test_integration_default_range_includes_everything() {
    let catalog = Catalog::sample();
    let results = aggregate_and_filter(&catalog, PriceRange::default(), &[], SortKey::Price);
    assert_eq!(results.len(), catalog.len());
    assert_eq!(results[0].name, "Pacific Heights");
}

#[test]
fn test_integration_reviews_for_resolved_neighborhood() {
    let catalog = Catalog::sample();
    let record = resolve_address("456 church st, san francisco", &catalog)
        .expect("address should resolve");
    assert_eq!(record.name, "Noe Valley");

    let synth = ReviewSynthesizer::new(&catalog);
    let mut rng = StdRng::seed_from_u64(2024);
    let reviews = synth.generate(&record.name, 2, &mut rng);

    assert_eq!(reviews.len(), 2);
    for review in &reviews {
        // Noe Valley: 4.6 +/- 0.3
        assert!(review.rating >= 4.3 && review.rating <= 4.9);
        assert!(review.content.starts_with("Review for Noe Valley."));
        assert!(review.tags.iter().all(|t| ["Family", "Safe", "Shopping", "Parks"].contains(&t.as_str())));
    }
}

#[test]
fn test_integration_insights_report() {
    let catalog = Catalog::sample();
    let address = "789 California St, San Francisco, CA";
    let record = resolve_address(address, &catalog).expect("address should resolve");

    let scorer = InsightScorer::with_default_weights();
    let mut rng = StdRng::seed_from_u64(7);
    let report = scorer.report(address, record, &catalog, &mut rng);

    assert_eq!(report.neighborhood, "Financial District");
    assert_eq!(report.real_estate.median_price, "$1,350,000");
    assert!(report.real_estate.price_trend_pct >= 3.0 && report.real_estate.price_trend_pct <= 7.0);
    assert!((20..=45).contains(&report.real_estate.avg_days_on_market));
    assert!(report.ml_insights.overall_score >= 0.0 && report.ml_insights.overall_score <= 100.0);
    assert!(!report.ml_insights.recommendations.is_empty());

    // Same seed, same report
    let again = scorer.report(address, record, &catalog, &mut StdRng::seed_from_u64(7));
    assert_eq!(report, again);
}

#[test]
fn test_integration_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
[[neighborhoods]]
name = "Dogpatch"
safetyScore = 7.9
educationScore = 7.0
transitScore = 7.4
amenitiesScore = 8.1
averagePrice = 1300000
topFeatures = ["Breweries", "Waterfront"]
addresses = ["100 3rd St"]
knownIssues = ["Industrial noise"]

[[neighborhoods]]
name = "Bernal Heights"
safetyScore = 8.1
educationScore = 7.6
transitScore = 6.9
amenitiesScore = 7.8
averagePrice = 1550000
topFeatures = ["Hilltop Park", "Waterfront"]
addresses = ["200 Cortland Ave"]
"#
    )
    .expect("write catalog");

    let catalog = Catalog::load(file.path()).expect("catalog should load");
    assert_eq!(catalog.len(), 2);

    let found = resolve_address("200 Cortland Ave, SF", &catalog).expect("address should resolve");
    assert_eq!(found.name, "Bernal Heights");

    let waterfront = aggregate_and_filter(
        &catalog,
        PriceRange::default(),
        &["Waterfront".to_string()],
        SortKey::Safety,
    );
    let names: Vec<&str> = waterfront.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Bernal Heights", "Dogpatch"]);

    let report = InsightScorer::default().report("100 3rd St", &catalog.records()[0], &catalog, &mut StdRng::seed_from_u64(1));
    assert_eq!(report.community.top_complaints, vec!["Industrial noise"]);
}

#[test]
fn test_integration_missing_catalog_file() {
    assert!(Catalog::load("/definitely/not/here/catalog.toml").is_err());
}
