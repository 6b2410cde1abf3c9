use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request carrying a free-text address
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(length(min = 1, max = 512))]
    #[serde(default)]
    pub address: String,
}

impl AddressRequest {
    /// Strip surrounding whitespace so a blank address fails validation
    pub fn trimmed(self) -> Self {
        Self {
            address: self.address.trim().to_string(),
        }
    }
}

/// Query parameters for the neighborhood listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNeighborhoodsQuery {
    #[serde(rename = "minPrice")]
    pub min_price: Option<u64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<u64>,
    /// Comma separated feature tags
    pub features: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

impl ListNeighborhoodsQuery {
    pub fn required_features(&self) -> Vec<String> {
        self.features
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsQuery {
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareQuery {
    #[validate(length(min = 1))]
    pub first: String,
    #[validate(length(min = 1))]
    pub second: String,
}
