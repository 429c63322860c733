//! Engine configuration with JSON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{
    CatalogError, CatalogResult, DEFAULT_HASH_BUCKETS, DEFAULT_RECOMMENDATION_LIMIT,
    SAME_CREATOR_WEIGHT,
};

/// Tunables for a [`super::CatalogEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Maximum number of records. `None` lets the store grow without bound.
    pub store_capacity: Option<usize>,

    /// Bucket count of the title hash index (rounded up to a prime).
    pub hash_buckets: usize,

    /// Load factor that triggers a hash index resize. `None` never resizes.
    pub hash_max_load: Option<f64>,

    /// Edge weight between records sharing a creator.
    pub same_creator_weight: f32,

    /// Recommendation count used when the caller does not give one.
    pub default_recommendation_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            store_capacity: None,
            hash_buckets: DEFAULT_HASH_BUCKETS,
            hash_max_load: None,
            same_creator_weight: SAME_CREATOR_WEIGHT,
            default_recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}

impl CatalogConfig {
    /// Config for a fixed-size store.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store_capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Load from a JSON file. Missing fields take their defaults; out-of-range
    /// values are rejected.
    pub fn from_json_file(path: &Path) -> CatalogResult<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field is in range.
    pub fn validate(&self) -> CatalogResult<()> {
        if let Some(max_load) = self.hash_max_load {
            if !(max_load.is_finite() && max_load > 0.0) {
                return Err(CatalogError::InvalidInput(format!(
                    "hash_max_load must be a positive number, got {}",
                    max_load
                )));
            }
        }
        if !(self.same_creator_weight.is_finite() && self.same_creator_weight >= 0.0) {
            return Err(CatalogError::InvalidInput(format!(
                "same_creator_weight must be a non-negative number, got {}",
                self.same_creator_weight
            )));
        }
        Ok(())
    }

    /// Save as pretty-printed JSON.
    pub fn to_json_file(&self, path: &Path) -> CatalogResult<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
