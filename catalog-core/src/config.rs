//! # Catalog Configuration
//!
//! Tunables for the catalog browser, loadable from YAML. Every field has a
//! default, so a partial file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::filter_pipeline::PipelineOptions;
use crate::domain::load_trigger::DEFAULT_THRESHOLD;
use crate::error::CatalogError;

pub const DEFAULT_API_URL: &str = "https://closet-recruiting-api.azurewebsites.net/api/data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Endpoint returning the full, unfiltered item list
    pub api_url: String,
    /// Apply the price range as a live filter on Paid items
    pub apply_price_range: bool,
    /// Fraction of the sentinel that must be visible to trigger a page load
    pub intersection_threshold: f64,
    /// Quiet period before a resize recomputes the grid layout
    pub resize_debounce_ms: u64,
    /// Height of one item card in pixels
    pub row_height: f64,
    /// Artificial latency between starting and finishing a page extension
    pub page_load_delay_ms: u32,
    /// Placeholder cards shown while content is loading
    pub skeleton_count: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            apply_price_range: false,
            intersection_threshold: DEFAULT_THRESHOLD,
            resize_debounce_ms: 100,
            row_height: 300.0,
            page_load_delay_ms: 0,
            skeleton_count: 8,
        }
    }
}

impl CatalogConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("⚙️ Loading catalog config from {:?}", path);
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.api_url.trim().is_empty() {
            return Err(CatalogError::InvalidConfig("api_url must not be empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.intersection_threshold) {
            return Err(CatalogError::InvalidConfig(format!(
                "intersection_threshold must be within [0, 1], got {}",
                self.intersection_threshold
            )));
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(CatalogError::InvalidConfig(format!(
                "row_height must be positive, got {}",
                self.row_height
            )));
        }
        Ok(())
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            apply_price_range: self.apply_price_range,
        }
    }
}
