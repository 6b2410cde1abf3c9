use crate::core::catalog::Catalog;
use crate::core::random::RandomSource;
use crate::models::{ReviewProfile, SynthesizedReview};
use chrono::{DateTime, Duration, Utc};

/// Lowest and highest possible review rating
const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

/// Reviews are backdated by up to this many days
const MAX_AGE_DAYS: i64 = 30;

/// Generates mock reviews from per-neighborhood profiles
///
/// Output is intentionally random (demo data). Callers supply the random
/// source, so tests can make it deterministic.
#[derive(Debug, Clone)]
pub struct ReviewSynthesizer<'a> {
    catalog: &'a Catalog,
    default_profile: ReviewProfile,
}

impl<'a> ReviewSynthesizer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            default_profile: ReviewProfile::default(),
        }
    }

    /// Profile for `name`, or the default profile when none is configured
    pub fn profile_for(&self, name: &str) -> &ReviewProfile {
        self.catalog.profile(name).unwrap_or(&self.default_profile)
    }

    /// Generate `count` reviews dated relative to the current time
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        name: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<SynthesizedReview> {
        self.generate_at(name, count, Utc::now(), rng)
    }

    /// Generate `count` reviews dated relative to `now`
    pub fn generate_at<R: RandomSource + ?Sized>(
        &self,
        name: &str,
        count: usize,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<SynthesizedReview> {
        let profile = self.profile_for(name);
        (1..=count)
            .map(|seq| synthesize_one(name, &seq.to_string(), profile, now, &mut *rng))
            .collect()
    }
}

/// Draws, in order: rating, date offset, tag count, helpfulness jitter
fn synthesize_one<R: RandomSource + ?Sized>(
    name: &str,
    id: &str,
    profile: &ReviewProfile,
    now: DateTime<Utc>,
    rng: &mut R,
) -> SynthesizedReview {
    let rating = sample_rating(profile, rng);

    let age_ms = rng.uniform(0.0, (MAX_AGE_DAYS * 24 * 60 * 60 * 1000) as f64) as i64;
    let date = (now - Duration::milliseconds(age_ms)).date_naive();

    let tag_count = (2 + rng.uniform_int(0, 2) as usize).min(profile.tags.len());
    let tags = profile.tags[..tag_count].to_vec();

    let helpful = helpfulness(profile.helpful_base, rating, rng.uniform(0.8, 1.2));

    SynthesizedReview {
        id: id.to_string(),
        author: format!("User{}", id),
        rating,
        date,
        content: format!("Review for {}. Rating: {}", name, rating),
        tags,
        helpful,
    }
}

/// Uniform rating within the profile's spread, clamped to 1-5 and rounded to
/// one decimal
fn sample_rating<R: RandomSource + ?Sized>(profile: &ReviewProfile, rng: &mut R) -> f64 {
    let low = (profile.avg_rating - profile.rating_range).max(MIN_RATING);
    let high = (profile.avg_rating + profile.rating_range).min(MAX_RATING);
    let raw = rng.uniform(low, high);
    ((raw * 10.0).round() / 10.0).clamp(MIN_RATING, MAX_RATING)
}

#[inline]
fn helpfulness(base: u32, rating: f64, jitter: f64) -> u32 {
    (base as f64 * (rating / MAX_RATING) * jitter).floor().max(0.0) as u32
}
