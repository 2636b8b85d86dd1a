use thiserror::Error;

/// Main error type for e-Stat API operations
#[derive(Debug, Error)]
pub enum EstatError {
    /// No application ID in the options or the environment
    #[error("application ID is required")]
    MissingAppId,

    /// Other configuration errors
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Non-2xx HTTP status
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// Parameters that cannot be flattened into a query string
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl EstatError {
    /// Create a new HTTP error
    pub fn http(status: u16, body: String) -> Self {
        EstatError::Http { status, body }
    }

    /// Check if this error was raised while resolving the configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, EstatError::MissingAppId | EstatError::Config(_))
    }

    /// Get the HTTP status code if the server answered with one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            EstatError::Http { status, .. } => Some(*status),
            EstatError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for e-Stat operations
pub type Result<T> = std::result::Result<T, EstatError>;
