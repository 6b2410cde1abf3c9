use crate::models::{CrimeTrend, NeighborhoodRecord, ReviewProfile};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Upper bound of every sub-score
pub const MAX_SUB_SCORE: f64 = 10.0;

/// Errors raised while building or loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate neighborhood name: {0}")]
    DuplicateName(String),

    #[error("Neighborhood {name}: {field} score {value} is outside 0-10")]
    ScoreOutOfRange {
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("Neighborhood {0} has an empty representative address")]
    EmptyAddress(String),

    #[error("Review profile {name}: {reason}")]
    InvalidProfile { name: String, reason: String },
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    neighborhoods: Vec<NeighborhoodRecord>,
    #[serde(default)]
    profiles: HashMap<String, ReviewProfile>,
}

/// Immutable neighborhood reference data
///
/// Records keep their insertion order, which is the iteration order used for
/// first-match address resolution and for sort tie-breaking.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<NeighborhoodRecord>,
    profiles: HashMap<String, ReviewProfile>,
}

impl Catalog {
    /// Build a validated catalog
    pub fn new(
        records: Vec<NeighborhoodRecord>,
        profiles: HashMap<String, ReviewProfile>,
    ) -> Result<Self, CatalogError> {
        validate_records(&records)?;
        validate_profiles(&records, &profiles)?;
        Ok(Self { records, profiles })
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::new(file.neighborhoods, file.profiles)
    }

    /// Load a catalog from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_toml_str(&raw)?;
        tracing::info!(
            "Loaded catalog from {} ({} neighborhoods, {} review profiles)",
            path.as_ref().display(),
            catalog.records.len(),
            catalog.profiles.len()
        );
        Ok(catalog)
    }

    /// Built-in San Francisco sample catalog
    pub fn sample() -> Self {
        Self {
            records: sample_records(),
            profiles: sample_profiles(),
        }
    }

    pub fn records(&self) -> &[NeighborhoodRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact (case-insensitive) lookup by name
    pub fn get(&self, name: &str) -> Option<&NeighborhoodRecord> {
        let name = name.trim();
        self.records
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Review profile by neighborhood name, ignoring case like [`Catalog::get`]
    pub fn profile(&self, name: &str) -> Option<&ReviewProfile> {
        let name = name.trim();
        self.profiles.get(name).or_else(|| {
            self.profiles
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, profile)| profile)
        })
    }

    /// Ordered, de-duplicated feature tags across all records
    pub fn feature_vocabulary(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .flat_map(|r| r.top_features.iter())
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}

fn validate_records(records: &[NeighborhoodRecord]) -> Result<(), CatalogError> {
    let mut names = HashSet::new();

    for record in records {
        if !names.insert(record.name.to_lowercase()) {
            return Err(CatalogError::DuplicateName(record.name.clone()));
        }

        for (field, value) in [
            ("safety", record.safety_score),
            ("education", record.education_score),
            ("transit", record.transit_score),
            ("amenities", record.amenities_score),
        ] {
            if !(0.0..=MAX_SUB_SCORE).contains(&value) {
                return Err(CatalogError::ScoreOutOfRange {
                    name: record.name.clone(),
                    field,
                    value,
                });
            }
        }

        if record.addresses.iter().any(|a| a.trim().is_empty()) {
            return Err(CatalogError::EmptyAddress(record.name.clone()));
        }
    }

    for (earlier, later, address) in overlapping_addresses(records) {
        tracing::warn!(
            "Address '{}' of {} overlaps an address of {}; {} wins resolution when both match",
            address,
            later,
            earlier,
            earlier
        );
    }

    Ok(())
}

/// Address pairs across different records where one contains the other
///
/// Returns `(earlier record, later record, later record's address)`. A query
/// naming the longer address also contains the shorter one, so resolution
/// picks whichever record comes first.
fn overlapping_addresses(records: &[NeighborhoodRecord]) -> Vec<(&str, &str, &str)> {
    let lowered: Vec<Vec<String>> = records
        .iter()
        .map(|r| r.addresses.iter().map(|a| a.to_lowercase()).collect())
        .collect();

    let mut overlaps = Vec::new();
    for (i, earlier) in records.iter().enumerate() {
        for (j, later) in records.iter().enumerate().skip(i + 1) {
            for (k, address) in lowered[j].iter().enumerate() {
                let clash = lowered[i]
                    .iter()
                    .any(|other| address.contains(other.as_str()) || other.contains(address.as_str()));
                if clash {
                    overlaps.push((earlier.name.as_str(), later.name.as_str(), later.addresses[k].as_str()));
                }
            }
        }
    }
    overlaps
}

fn validate_profiles(
    records: &[NeighborhoodRecord],
    profiles: &HashMap<String, ReviewProfile>,
) -> Result<(), CatalogError> {
    for (name, profile) in profiles {
        if !(1.0..=5.0).contains(&profile.avg_rating) {
            return Err(CatalogError::InvalidProfile {
                name: name.clone(),
                reason: format!("average rating {} is outside 1-5", profile.avg_rating),
            });
        }
        if profile.rating_range < 0.0 {
            return Err(CatalogError::InvalidProfile {
                name: name.clone(),
                reason: "rating range must not be negative".to_string(),
            });
        }
        if !records.iter().any(|r| r.name.eq_ignore_ascii_case(name)) {
            tracing::warn!("Review profile {} has no matching neighborhood", name);
        }
    }
    Ok(())
}

fn record(
    name: &str,
    scores: [f64; 4],
    average_price: u64,
    features: [&str; 4],
    addresses: [&str; 5],
    issues: &[&str],
    (recent_incidents, crime_trend): (u32, CrimeTrend),
) -> NeighborhoodRecord {
    NeighborhoodRecord {
        name: name.to_string(),
        safety_score: scores[0],
        education_score: scores[1],
        transit_score: scores[2],
        amenities_score: scores[3],
        average_price,
        top_features: features.iter().map(|s| s.to_string()).collect(),
        addresses: addresses.iter().map(|s| s.to_string()).collect(),
        known_issues: issues.iter().map(|s| s.to_string()).collect(),
        recent_incidents,
        crime_trend,
    }
}

fn sample_records() -> Vec<NeighborhoodRecord> {
    vec![
        record(
            "Mission District",
            [6.8, 7.5, 9.2, 9.5],
            1_200_000,
            ["Vibrant Culture", "Food Scene", "Street Art", "Nightlife"],
            ["123 Valencia St", "456 Mission St", "789 Guerrero St", "321 24th St", "654 Dolores St"],
            &["Traffic during rush hour", "Limited parking", "Late-night noise"],
            (5, CrimeTrend::Stable),
        ),
        record(
            "Pacific Heights",
            [9.5, 9.8, 7.2, 8.0],
            2_800_000,
            ["Luxury Homes", "Bay Views", "Private Schools", "Upscale Shopping"],
            ["321 Fillmore St", "654 Broadway St", "987 Pacific Ave", "456 Jackson St", "789 Washington St"],
            &["High cost of living", "Quiet nightlife"],
            (1, CrimeTrend::Decreasing),
        ),
        record(
            "Hayes Valley",
            [8.2, 8.0, 9.0, 9.3],
            1_650_000,
            ["Boutique Shopping", "Performing Arts", "Trendy Restaurants", "Modern Condos"],
            ["123 Hayes St", "456 Gough St", "789 Octavia St", "321 Franklin St", "654 Laguna St"],
            &["Limited parking", "Street cleaning tickets"],
            (3, CrimeTrend::Decreasing),
        ),
        record(
            "North Beach",
            [8.5, 7.8, 8.7, 9.4],
            1_450_000,
            ["Italian Heritage", "Tourist Spots", "Historic Cafes", "Comedy Clubs"],
            ["123 Columbus Ave", "456 Grant Ave", "789 Stockton St", "321 Broadway St", "654 Francisco St"],
            &["Tourist crowds", "Limited parking", "Weekend noise"],
            (3, CrimeTrend::Stable),
        ),
        record(
            "Marina District",
            [9.2, 8.5, 7.8, 9.0],
            2_200_000,
            ["Marina Views", "Fitness Studios", "Brunch Spots", "Palace of Fine Arts"],
            ["123 Chestnut St", "456 Union St", "789 Lombard St", "321 Marina Blvd", "654 Bay St"],
            &["Weekend crowds", "Limited parking"],
            (2, CrimeTrend::Decreasing),
        ),
        record(
            "Russian Hill",
            [9.0, 8.7, 7.5, 8.3],
            2_100_000,
            ["Scenic Views", "Crooked Street", "Hidden Staircases", "Classic Architecture"],
            ["123 Hyde St", "456 Leavenworth St", "789 Jones St", "321 Taylor St", "654 Vallejo St"],
            &["Steep hills", "Limited parking"],
            (2, CrimeTrend::Stable),
        ),
        record(
            "Noe Valley",
            [9.4, 9.3, 7.8, 8.5],
            1_950_000,
            ["Family-Friendly", "Farmers Market", "Stroller Valley", "Victorian Homes"],
            ["123 24th St", "456 Church St", "789 Castro St", "321 Sanchez St", "654 Noe St"],
            &["Limited transit options"],
            (1, CrimeTrend::Decreasing),
        ),
        record(
            "Financial District",
            [8.0, 7.5, 9.8, 8.8],
            1_350_000,
            ["Business Hub", "High-rises", "Transit Hub", "Fine Dining"],
            ["123 Market St", "456 Montgomery St", "789 California St", "321 Battery St", "654 Sansome St"],
            &["Quiet after business hours", "Traffic during rush hour", "Need more green spaces"],
            (4, CrimeTrend::Increasing),
        ),
    ]
}

fn sample_profiles() -> HashMap<String, ReviewProfile> {
    let profile = |avg_rating: f64, rating_range: f64, tags: [&str; 4], helpful_base: u32| ReviewProfile {
        avg_rating,
        rating_range,
        tags: tags.iter().map(|s| s.to_string()).collect(),
        helpful_base,
    };

    HashMap::from([
        ("Mission District".to_string(), profile(3.8, 0.6, ["Food", "Culture", "Nightlife", "Transit"], 15)),
        ("Pacific Heights".to_string(), profile(4.7, 0.3, ["Luxury", "Views", "Safety", "Schools"], 25)),
        ("Hayes Valley".to_string(), profile(4.3, 0.4, ["Shopping", "Arts", "Dining", "Transit"], 20)),
        ("North Beach".to_string(), profile(4.2, 0.4, ["Italian", "Historic", "Tourist", "Food"], 22)),
        ("Marina District".to_string(), profile(4.4, 0.4, ["Active", "Views", "Young", "Shopping"], 23)),
        ("Russian Hill".to_string(), profile(4.5, 0.4, ["Views", "Historic", "Quiet", "Hills"], 24)),
        ("Noe Valley".to_string(), profile(4.6, 0.3, ["Family", "Safe", "Shopping", "Parks"], 21)),
        ("Financial District".to_string(), profile(3.9, 0.4, ["Business", "Transit", "Modern", "Dining"], 18)),
    ])
}
