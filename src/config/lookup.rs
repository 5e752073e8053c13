use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Reference lookup settings for the tax-authority endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    pub base_url: String,
    /// Without a token the engine runs offline and leaves reference pairs empty
    pub api_token: Option<String>,
    pub timeout_secs: u64,
    pub concurrency: usize,
    pub cache_enabled: bool,
}

impl LookupConfig {
    pub fn from_env() -> Result<Self> {
        Ok(LookupConfig {
            base_url: env::var("FBR_API_BASE_URL")
                .unwrap_or_else(|_| "https://gw.fbr.gov.pk".to_string()),
            api_token: env::var("FBR_API_TOKEN")
                .ok()
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty()),
            timeout_secs: env::var("LOOKUP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid LOOKUP_TIMEOUT_SECS".to_string()))?,
            concurrency: env::var("LOOKUP_CONCURRENCY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid LOOKUP_CONCURRENCY".to_string()))?,
            cache_enabled: env::var("LOOKUP_CACHE")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .map_err(|_| AppError::Configuration("Invalid LOOKUP_CACHE".to_string()))?,
        })
    }

    pub fn is_online(&self) -> bool {
        self.api_token.is_some()
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gw.fbr.gov.pk".to_string(),
            api_token: None,
            timeout_secs: 10,
            concurrency: 4,
            cache_enabled: true,
        }
    }
}
