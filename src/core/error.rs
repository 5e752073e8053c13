/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for malformed documents or inputs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reference lookup errors reported by the tax authority service
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// A reference lookup did not answer in time
    #[error("Lookup timed out after {0} seconds")]
    Timeout(u64),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Scenario catalog override parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn lookup(msg: impl Into<String>) -> Self {
        AppError::Lookup(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Whether the error came from the reference lookup collaborator.
    /// Such errors are absorbed per item and never abort a document.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            AppError::Lookup(_) | AppError::Timeout(_) | AppError::HttpClient(_)
        )
    }
}
