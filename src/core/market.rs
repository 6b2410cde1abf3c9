use crate::core::random::RandomSource;
use crate::models::{MarketStatus, NeighborhoodRecord, RealEstateSnapshot};

/// Weighted market status buckets used by the estimator
const MARKET_STATUS_WEIGHTS: [(MarketStatus, f64); 3] = [
    (MarketStatus::Hot, 0.4),
    (MarketStatus::Sellers, 0.4),
    (MarketStatus::Balanced, 0.2),
];

const BASE_PRICE_PER_SQFT: i64 = 750;

/// Estimate a real estate snapshot for a neighborhood
///
/// Only the median price comes from the record; trend, days on market, price
/// per square foot and market status are sampled.
pub fn estimate<R: RandomSource + ?Sized>(
    record: &NeighborhoodRecord,
    rng: &mut R,
) -> RealEstateSnapshot {
    let trend = (rng.uniform(3.0, 7.0) * 10.0).round() / 10.0;
    let avg_days_on_market = rng.uniform_int(20, 45) as u32;
    let price_per_sqft = BASE_PRICE_PER_SQFT + rng.uniform_int(-50, 50);
    let market_status = weighted_status(rng.next_unit());

    RealEstateSnapshot {
        median_price: format_dollars(record.average_price),
        price_trend: format!("+{:.1}% (Last 12 months)", trend),
        price_trend_pct: trend,
        market_status,
        price_per_sqft: format_dollars(price_per_sqft.max(0) as u64),
        avg_days_on_market,
    }
}

fn weighted_status(sample: f64) -> MarketStatus {
    let mut cumulative = 0.0;
    for (status, weight) in MARKET_STATUS_WEIGHTS {
        cumulative += weight;
        if sample < cumulative {
            return status;
        }
    }
    MarketStatus::Balanced
}

/// `1200000` -> `$1,200,000`
pub fn format_dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
