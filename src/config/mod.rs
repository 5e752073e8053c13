use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod engine;
pub mod lookup;

pub use engine::EngineConfig;
pub use lookup::LookupConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub engine: EngineConfig,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// `text` or `json`
    pub log_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "development".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl AppConfig {
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            },
            engine: EngineConfig::from_env()?,
            lookup: LookupConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.app.log_format.to_ascii_lowercase().as_str(), "text" | "json") {
            return Err(AppError::Configuration(format!(
                "LOG_FORMAT must be 'text' or 'json', got: {}",
                self.app.log_format
            )));
        }

        if self.engine.seller_province_code.trim().is_empty() {
            return Err(AppError::Configuration(
                "SELLER_PROVINCE_CODE cannot be empty".to_string(),
            ));
        }

        if self.lookup.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Lookup timeout must be greater than 0".to_string(),
            ));
        }

        if self.lookup.concurrency == 0 {
            return Err(AppError::Configuration(
                "Lookup concurrency must be greater than 0".to_string(),
            ));
        }

        if self.lookup.is_online() && self.lookup.base_url.trim().is_empty() {
            return Err(AppError::Configuration(
                "FBR_API_BASE_URL cannot be empty when a token is set".to_string(),
            ));
        }

        Ok(())
    }
}
