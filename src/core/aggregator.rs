use crate::core::catalog::Catalog;
use crate::models::{
    AxisComparison, NeighborhoodComparison, NeighborhoodRecord, PriceRange, ScoreAxis, SortKey,
};
use std::cmp::Ordering;

/// Overall rating: unweighted mean of the four sub-scores
#[inline]
pub fn overall_score(record: &NeighborhoodRecord) -> f64 {
    (record.safety_score + record.education_score + record.transit_score + record.amenities_score)
        / 4.0
}

/// Keep records priced within `price_range` (inclusive) that carry every tag
/// in `required_tags`
///
/// An inverted range simply matches nothing.
pub fn filter<'a>(
    catalog: &'a Catalog,
    price_range: PriceRange,
    required_tags: &[String],
) -> Vec<&'a NeighborhoodRecord> {
    catalog
        .records()
        .iter()
        .filter(|record| price_range.contains(record.average_price))
        .filter(|record| record.has_features(required_tags))
        .collect()
}

/// Stable descending sort on one key
pub fn sort(records: &mut [&NeighborhoodRecord], key: SortKey) {
    // slice::sort_by is stable, so equal keys keep their incoming order
    records.sort_by(|a, b| compare_desc(a, b, key));
}

fn compare_desc(a: &NeighborhoodRecord, b: &NeighborhoodRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => b.average_price.cmp(&a.average_price),
        SortKey::Safety => desc_f64(a.safety_score, b.safety_score),
        SortKey::Education => desc_f64(a.education_score, b.education_score),
        SortKey::Transit => desc_f64(a.transit_score, b.transit_score),
        SortKey::Amenities => desc_f64(a.amenities_score, b.amenities_score),
    }
}

#[inline]
fn desc_f64(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Filter the catalog, then sort the survivors
pub fn aggregate_and_filter<'a>(
    catalog: &'a Catalog,
    price_range: PriceRange,
    required_tags: &[String],
    sort_key: SortKey,
) -> Vec<&'a NeighborhoodRecord> {
    let mut records = filter(catalog, price_range, required_tags);
    sort(&mut records, sort_key);

    tracing::debug!(
        "Aggregated {} of {} neighborhoods (price {}..={}, {} tags, sort by {})",
        records.len(),
        catalog.len(),
        price_range.min,
        price_range.max,
        required_tags.len(),
        sort_key
    );

    records
}

/// Side-by-side comparison; differences are `second - first`
pub fn compare(first: &NeighborhoodRecord, second: &NeighborhoodRecord) -> NeighborhoodComparison {
    let axes = ScoreAxis::ALL
        .iter()
        .map(|&axis| {
            let a = first.score(axis);
            let b = second.score(axis);
            AxisComparison {
                axis,
                first: a,
                second: b,
                difference: round2(b - a),
            }
        })
        .collect();

    NeighborhoodComparison {
        first: first.name.clone(),
        second: second.name.clone(),
        axes,
        overall_difference: round2(overall_score(second) - overall_score(first)),
        price_difference: second.average_price as i64 - first.average_price as i64,
    }
}

#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CrimeTrend;
    use std::collections::HashMap;

    fn record(name: &str, scores: [f64; 4], price: u64, tags: &[&str]) -> NeighborhoodRecord {
        NeighborhoodRecord {
            name: name.to_string(),
            safety_score: scores[0],
            education_score: scores[1],
            transit_score: scores[2],
            amenities_score: scores[3],
            average_price: price,
            top_features: tags.iter().map(|s| s.to_string()).collect(),
            addresses: vec![format!("1 {} Way", name)],
            known_issues: vec![],
            recent_incidents: 0,
            crime_trend: CrimeTrend::Stable,
        }
    }

    fn names(records: &[&NeighborhoodRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_overall_score_is_mean() {
        let r = record("A", [2.0, 4.0, 6.0, 8.0], 1, &[]);
        assert_eq!(overall_score(&r), 5.0);
    }

    #[test]
    fn test_filter_by_price_and_tags() {
        let catalog = Catalog::new(
            vec![
                record("A", [5.0; 4], 900_000, &["Parks", "Food"]),
                record("B", [5.0; 4], 1_100_000, &["Parks"]),
                record("C", [5.0; 4], 1_400_000, &["Food", "Parks", "Nightlife"]),
            ],
            HashMap::new(),
        )
        .expect("catalog should build");

        let all = filter(&catalog, PriceRange::default(), &[]);
        assert_eq!(names(&all), vec!["A", "B", "C"]);

        let priced = filter(&catalog, PriceRange::new(1_000_000, 1_400_000), &[]);
        assert_eq!(names(&priced), vec!["B", "C"]);

        let tagged = filter(
            &catalog,
            PriceRange::default(),
            &["Food".to_string(), "Parks".to_string()],
        );
        assert_eq!(names(&tagged), vec!["A", "C"]);

        let unknown = filter(&catalog, PriceRange::default(), &["Beaches".to_string()]);
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let catalog = Catalog::sample();
        assert!(filter(&catalog, PriceRange::new(2_000_000, 1_000_000), &[]).is_empty());
    }

    #[test]
    fn test_sort_ties_keep_input_order() {
        let a = record("A", [7.0, 1.0, 1.0, 1.0], 1, &[]);
        let b = record("B", [9.0, 1.0, 1.0, 1.0], 1, &[]);
        let c = record("C", [7.0, 1.0, 1.0, 1.0], 1, &[]);
        let d = record("D", [9.0, 1.0, 1.0, 1.0], 1, &[]);

        let mut records = vec![&a, &b, &c, &d];
        sort(&mut records, SortKey::Safety);
        assert_eq!(names(&records), vec!["B", "D", "A", "C"]);

        // Equal prices everywhere: order untouched
        sort(&mut records, SortKey::Price);
        assert_eq!(names(&records), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_sort_each_key() {
        let catalog = Catalog::sample();
        let mut records: Vec<_> = catalog.records().iter().collect();

        sort(&mut records, SortKey::Transit);
        assert_eq!(records[0].name, "Financial District");

        sort(&mut records, SortKey::Education);
        assert_eq!(records[0].name, "Pacific Heights");

        sort(&mut records, SortKey::Amenities);
        assert_eq!(records[0].name, "Mission District");

        sort(&mut records, SortKey::Price);
        assert_eq!(records[0].name, "Pacific Heights");
        assert_eq!(records[records.len() - 1].name, "Mission District");
    }

    #[test]
    fn test_compare() {
        let a = record("A", [6.0, 7.0, 8.0, 9.0], 1_000_000, &[]);
        let b = record("B", [9.0, 7.0, 6.5, 9.5], 1_500_000, &[]);

        let cmp = compare(&a, &b);
        assert_eq!(cmp.first, "A");
        assert_eq!(cmp.second, "B");
        assert_eq!(cmp.axes.len(), 4);
        assert_eq!(cmp.axes[0].axis, ScoreAxis::Safety);
        assert_eq!(cmp.axes[0].difference, 3.0);
        assert_eq!(cmp.axes[2].difference, -1.5);
        assert_eq!(cmp.overall_difference, 0.5);
        assert_eq!(cmp.price_difference, 500_000);
    }
}
