use crate::core::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Settings for the line-processing engine
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Province of supply used when a document carries none
    pub seller_province_code: String,
    /// YAML file whose scenarios replace or extend the built-in catalog
    pub scenario_catalog_path: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        Ok(EngineConfig {
            seller_province_code: env::var("SELLER_PROVINCE_CODE")
                .unwrap_or_else(|_| "7".to_string()),
            scenario_catalog_path: env::var("SCENARIO_CATALOG_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seller_province_code: "7".to_string(),
            scenario_catalog_path: None,
        }
    }
}
