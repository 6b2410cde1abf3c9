use crate::core::aggregator::round2;
use crate::core::catalog::Catalog;
use crate::core::market;
use crate::core::random::RandomSource;
use crate::models::{
    CommunityInsights, ComponentScores, CrimeAnalysis, InsightWeights, InsightsReport,
    MarketStatus, MlInsights, NeighborhoodRecord, RealEstateSnapshot, RiskLevel,
};

/// Components scoring below this get a recommendation
const RECOMMENDATION_THRESHOLD: f64 = 60.0;

/// Produces the weighted 0-100 insight score and the full insights report
///
/// Component formulas:
/// - safety: mean of risk bucket, safety sub-score (x10) and an incident penalty
/// - real_estate: mean of trend score and market status score
/// - education: education sub-score (x10)
/// - amenities: mean of walkability (amenities x10) and transit (x10)
/// - community: 70 + 5 per positive aspect - 3 per complaint
#[derive(Debug, Clone, Copy)]
pub struct InsightScorer {
    weights: InsightWeights,
}

impl InsightScorer {
    pub fn new(weights: InsightWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: InsightWeights::default(),
        }
    }

    pub fn weights(&self) -> &InsightWeights {
        &self.weights
    }

    /// Build the insights report for an already resolved neighborhood
    pub fn report<R: RandomSource + ?Sized>(
        &self,
        address: &str,
        record: &NeighborhoodRecord,
        catalog: &Catalog,
        rng: &mut R,
    ) -> InsightsReport {
        let crime_analysis = crime_analysis(record, catalog);
        let real_estate = market::estimate(record, rng);
        let community = CommunityInsights {
            positive_aspects: record.top_features.clone(),
            top_complaints: record.known_issues.clone(),
        };

        let ml_insights = self.score(record, &crime_analysis, &real_estate, &community);

        tracing::debug!(
            "Insights for {} ({}): overall {}",
            address,
            record.name,
            ml_insights.overall_score
        );

        InsightsReport {
            address: address.to_string(),
            neighborhood: record.name.clone(),
            ml_insights,
            crime_analysis,
            real_estate,
            community,
        }
    }

    /// Weighted score over all components
    pub fn score(
        &self,
        record: &NeighborhoodRecord,
        crime: &CrimeAnalysis,
        real_estate: &RealEstateSnapshot,
        community: &CommunityInsights,
    ) -> MlInsights {
        let safety = safety_component(crime);
        let real_estate = real_estate_component(real_estate);
        let education = clamp_pct(record.education_score * 10.0);
        let amenities = clamp_pct((record.amenities_score * 10.0 + record.transit_score * 10.0) / 2.0);
        let community = community_component(community);

        let overall = safety * self.weights.safety
            + real_estate * self.weights.real_estate
            + education * self.weights.education
            + amenities * self.weights.amenities
            + community * self.weights.community;

        let components = ComponentScores {
            safety: round2(safety),
            real_estate: round2(real_estate),
            education: round2(education),
            amenities: round2(amenities),
            community: round2(community),
        };

        MlInsights {
            overall_score: round2(overall),
            interpretation: interpret(overall).to_string(),
            recommendations: recommendations(&components),
            component_scores: components,
        }
    }
}

impl Default for InsightScorer {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Crime summary from the record's safety data, ranked against the rest of the
/// catalog
pub fn crime_analysis(record: &NeighborhoodRecord, catalog: &Catalog) -> CrimeAnalysis {
    let others: Vec<_> = catalog
        .records()
        .iter()
        .filter(|r| r.name != record.name)
        .collect();
    let safer_than = others
        .iter()
        .filter(|r| r.safety_score < record.safety_score)
        .count();
    let percentile = if others.is_empty() {
        0
    } else {
        (safer_than as f64 / others.len() as f64 * 100.0).round() as u32
    };

    CrimeAnalysis {
        risk_level: RiskLevel::from_safety_score(record.safety_score),
        safety_score: record.safety_score,
        trend: record.crime_trend,
        comparison: format!("Safer than {}% of catalog neighborhoods", percentile),
        recent_incidents: record.recent_incidents,
    }
}

fn safety_component(crime: &CrimeAnalysis) -> f64 {
    let risk = match crime.risk_level {
        RiskLevel::Low => 90.0,
        RiskLevel::Medium => 60.0,
        RiskLevel::High => 30.0,
    };
    let incidents = 100.0 - 10.0 * crime.recent_incidents as f64;
    clamp_pct((risk + crime.safety_score * 10.0 + incidents) / 3.0)
}

fn real_estate_component(snapshot: &RealEstateSnapshot) -> f64 {
    let trend = clamp_pct(50.0 + snapshot.price_trend_pct * 5.0);
    let market = match snapshot.market_status {
        MarketStatus::Hot => 90.0,
        MarketStatus::Sellers => 80.0,
        MarketStatus::Balanced => 70.0,
        MarketStatus::Buyers => 60.0,
    };
    (trend + market) / 2.0
}

fn community_component(community: &CommunityInsights) -> f64 {
    let positives = community.positive_aspects.len() as f64;
    let complaints = community.top_complaints.len() as f64;
    clamp_pct(70.0 + positives * 5.0 - complaints * 3.0)
}

#[inline]
fn clamp_pct(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn interpret(score: f64) -> &'static str {
    if score >= 90.0 {
        "Exceptional neighborhood with outstanding features across all categories"
    } else if score >= 80.0 {
        "Excellent neighborhood with strong performance in most areas"
    } else if score >= 70.0 {
        "Very good neighborhood with above-average characteristics"
    } else if score >= 60.0 {
        "Good neighborhood with some room for improvement"
    } else if score >= 50.0 {
        "Average neighborhood with mixed characteristics"
    } else {
        "Below average neighborhood with significant room for improvement"
    }
}

fn recommendations(components: &ComponentScores) -> Vec<String> {
    let checks = [
        (components.safety, "Review recent community safety initiatives and neighborhood watch programs"),
        (components.real_estate, "Monitor market trends and upcoming development projects"),
        (components.education, "Look into supplementary educational programs and resources"),
        (components.amenities, "Research planned infrastructure improvements and new business developments"),
        (components.community, "Explore community engagement opportunities to understand resident concerns"),
    ];

    let recs: Vec<String> = checks
        .iter()
        .filter(|(score, _)| *score < RECOMMENDATION_THRESHOLD)
        .map(|(_, text)| text.to_string())
        .collect();

    if recs.is_empty() {
        vec!["No specific recommendations - neighborhood scores well across all categories".to_string()]
    } else {
        recs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::testing::ScriptedSource;
    use crate::models::CrimeTrend;

    fn snapshot(trend: f64, status: MarketStatus) -> RealEstateSnapshot {
        RealEstateSnapshot {
            median_price: "$1,000,000".to_string(),
            price_trend: format!("+{:.1}% (Last 12 months)", trend),
            price_trend_pct: trend,
            market_status: status,
            price_per_sqft: "$750".to_string(),
            avg_days_on_market: 30,
        }
    }

    #[test]
    fn test_crime_analysis_percentile() {
        let catalog = Catalog::sample();
        let pacific = catalog.get("Pacific Heights").expect("sample record");
        let mission = catalog.get("Mission District").expect("sample record");

        let top = crime_analysis(pacific, &catalog);
        assert_eq!(top.risk_level, RiskLevel::Low);
        assert_eq!(top.comparison, "Safer than 100% of catalog neighborhoods");

        let bottom = crime_analysis(mission, &catalog);
        assert_eq!(bottom.risk_level, RiskLevel::Medium);
        assert_eq!(bottom.comparison, "Safer than 0% of catalog neighborhoods");
    }

    #[test]
    fn test_crime_analysis_carries_record_history() {
        let catalog = Catalog::sample();
        let pacific = crime_analysis(catalog.get("Pacific Heights").expect("sample record"), &catalog);
        let fidi = crime_analysis(catalog.get("Financial District").expect("sample record"), &catalog);

        assert_eq!(pacific.recent_incidents, 1);
        assert_eq!(pacific.trend, CrimeTrend::Decreasing);
        assert_eq!(fidi.recent_incidents, 4);
        assert_eq!(fidi.trend, CrimeTrend::Increasing);
        assert!(safety_component(&pacific) > safety_component(&fidi));
    }

    #[test]
    fn test_component_formulas() {
        let crime = CrimeAnalysis {
            risk_level: RiskLevel::Low,
            safety_score: 9.0,
            trend: CrimeTrend::Stable,
            comparison: String::new(),
            recent_incidents: 0,
        };
        // (90 + 90 + 100) / 3
        assert!((safety_component(&crime) - 93.333).abs() < 0.01);

        let busy = CrimeAnalysis {
            recent_incidents: 4,
            ..crime.clone()
        };
        // (90 + 90 + 60) / 3
        assert_eq!(safety_component(&busy), 80.0);

        // (min(100, 50 + 25) + 90) / 2
        assert_eq!(real_estate_component(&snapshot(5.0, MarketStatus::Hot)), 82.5);

        let community = CommunityInsights {
            positive_aspects: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            top_complaints: vec!["x".into(), "y".into(), "z".into()],
        };
        assert_eq!(community_component(&community), 81.0);
    }

    #[test]
    fn test_score_weights_and_rounding() {
        let catalog = Catalog::sample();
        let record = catalog.get("Hayes Valley").expect("sample record");
        let scorer = InsightScorer::with_default_weights();

        let crime = crime_analysis(record, &catalog);
        let community = CommunityInsights {
            positive_aspects: record.top_features.clone(),
            top_complaints: vec![],
        };
        let insights = scorer.score(record, &crime, &snapshot(4.0, MarketStatus::Sellers), &community);

        let c = &insights.component_scores;
        // Hayes Valley: safety 8.2 (Low risk, 3 incidents), education 8.0, transit 9.0,
        // amenities 9.3
        assert_eq!(crime.recent_incidents, 3);
        assert_eq!(c.safety, 80.67);
        assert_eq!(c.real_estate, 75.0);
        assert_eq!(c.education, 80.0);
        assert_eq!(c.amenities, 91.5);
        assert_eq!(c.community, 90.0);

        let expected = 242.0 / 3.0 * 0.30 + 75.0 * 0.25 + 80.0 * 0.20 + 91.5 * 0.15 + 90.0 * 0.10;
        assert!((insights.overall_score - expected).abs() < 0.01);
        assert_eq!(
            insights.interpretation,
            "Excellent neighborhood with strong performance in most areas"
        );
        assert_eq!(insights.recommendations.len(), 1);
        assert!(insights.recommendations[0].starts_with("No specific recommendations"));
    }

    #[test]
    fn test_low_components_get_recommendations() {
        let components = ComponentScores {
            safety: 45.0,
            real_estate: 70.0,
            education: 59.99,
            amenities: 60.0,
            community: 90.0,
        };
        let recs = recommendations(&components);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("safety"));
        assert!(recs[1].contains("educational"));
    }

    #[test]
    fn test_interpretation_thresholds() {
        assert!(interpret(95.0).starts_with("Exceptional"));
        assert!(interpret(80.0).starts_with("Excellent"));
        assert!(interpret(72.0).starts_with("Very good"));
        assert!(interpret(60.0).starts_with("Good"));
        assert!(interpret(55.0).starts_with("Average"));
        assert!(interpret(10.0).starts_with("Below average"));
    }

    #[test]
    fn test_report_shape() {
        let catalog = Catalog::sample();
        let record = catalog.get("North Beach").expect("sample record");
        let mut source = ScriptedSource::new(vec![0.5]);

        let report = InsightScorer::default().report("123 Columbus Ave", record, &catalog, &mut source);
        assert_eq!(report.address, "123 Columbus Ave");
        assert_eq!(report.neighborhood, "North Beach");
        assert_eq!(report.real_estate.median_price, "$1,450,000");
        assert_eq!(report.community.positive_aspects.len(), 4);
        assert_eq!(
            report.community.top_complaints,
            vec!["Tourist crowds", "Limited parking", "Weekend noise"]
        );
        // 70 + 4 * 5 - 3 * 3
        assert_eq!(report.ml_insights.component_scores.community, 81.0);
        assert_eq!(report.crime_analysis.recent_incidents, 3);
        assert_eq!(report.crime_analysis.trend, CrimeTrend::Stable);
        assert!(report.ml_insights.overall_score > 0.0 && report.ml_insights.overall_score <= 100.0);

        let json = serde_json::to_value(&report).expect("report serializes");
        assert!(json["ml_insights"]["component_scores"]["safety"].is_number());
        assert_eq!(json["crime_analysis"]["risk_level"], "Low");
        assert_eq!(json["crime_analysis"]["trend"], "Stable");
        assert_eq!(json["real_estate"]["market_status"], "Seller's Market");
    }
}
