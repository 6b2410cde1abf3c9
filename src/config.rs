use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::InsightWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub reviews: ReviewSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 4000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// TOML catalog file; the built-in sample catalog is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSettings {
    #[serde(default = "default_review_count")]
    pub default_count: u32,
    #[serde(default = "default_max_review_count")]
    pub max_count: u32,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            default_count: default_review_count(),
            max_count: default_max_review_count(),
        }
    }
}

fn default_review_count() -> u32 { 2 }
fn default_max_review_count() -> u32 { 20 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_safety_weight")]
    pub safety: f64,
    #[serde(default = "default_real_estate_weight")]
    pub real_estate: f64,
    #[serde(default = "default_education_weight")]
    pub education: f64,
    #[serde(default = "default_amenities_weight")]
    pub amenities: f64,
    #[serde(default = "default_community_weight")]
    pub community: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            safety: default_safety_weight(),
            real_estate: default_real_estate_weight(),
            education: default_education_weight(),
            amenities: default_amenities_weight(),
            community: default_community_weight(),
        }
    }
}

impl From<&WeightsConfig> for InsightWeights {
    fn from(w: &WeightsConfig) -> Self {
        Self {
            safety: w.safety,
            real_estate: w.real_estate,
            education: w.education,
            amenities: w.amenities,
            community: w.community,
        }
    }
}

fn default_safety_weight() -> f64 { 0.30 }
fn default_real_estate_weight() -> f64 { 0.25 }
fn default_education_weight() -> f64 { 0.20 }
fn default_amenities_weight() -> f64 { 0.15 }
fn default_community_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NBHD)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NBHD__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    /// Insight weights as configured
    pub fn insight_weights(&self) -> InsightWeights {
        InsightWeights::from(&self.scoring.weights)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("NBHD")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
