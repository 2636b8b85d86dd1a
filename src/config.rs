use crate::error::{EstatError, Result};
use std::time::Duration;
use url::Url;

/// Environment variable consulted when no application ID is passed explicitly
pub const APP_ID_ENV: &str = "ESTAT_APP_ID";

/// Default number of rows requested per call
pub const DEFAULT_LIMIT: u32 = 10;

/// Default API version
pub const DEFAULT_VERSION: &str = "3.0";

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.e-stat.go.jp/rest/";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Create the HTTP client used by [`crate::Client`]
#[cfg(feature = "blocking")]
pub fn create_rest_client(config: &Config) -> Result<reqwest::blocking::Client> {
    // None disables the blocking client's 30s default
    let client = reqwest::blocking::ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(config.timeout)
        .build()?;
    Ok(client)
}

/// Create the HTTP client used by [`crate::AsyncClient`]
#[cfg(feature = "async")]
pub fn create_async_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .connect_timeout(CONNECT_TIMEOUT);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Construction options. Every field is optional; unset fields are filled in
/// by [`Config::resolve`].
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Application ID issued by e-Stat
    pub app_id: Option<String>,
    /// Number of rows requested per call
    pub limit: Option<u32>,
    /// API version, e.g. "3.0"
    pub version: Option<String>,
    /// API endpoint, e.g. "https://api.e-stat.go.jp/rest/"
    pub endpoint: Option<String>,
    /// Overall request timeout
    pub timeout: Option<Duration>,
    /// Enable debug logging
    pub debug: bool,
}

impl Options {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application ID
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Set the request limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the API version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the overall request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Resolved, immutable client configuration
#[derive(Clone)]
pub struct Config {
    app_id: String,
    limit: u32,
    version: String,
    endpoint: String,
    timeout: Option<Duration>,
    debug: bool,
}

impl Config {
    /// Resolve options against an environment lookup.
    ///
    /// The application ID comes from `options.app_id`, then from
    /// `lookup(APP_ID_ENV)`. Empty strings count as absent, as does a limit
    /// of zero.
    ///
    /// # Errors
    /// [`EstatError::MissingAppId`] if neither source yields an application
    /// ID, [`EstatError::Config`] if the endpoint is not an absolute URL or
    /// has a query or fragment.
    pub fn resolve<F>(options: Options, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_id = options
            .app_id
            .filter(|id| !id.is_empty())
            .or_else(|| lookup(APP_ID_ENV).filter(|id| !id.is_empty()))
            .ok_or(EstatError::MissingAppId)?;

        let endpoint = options
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let parsed = Url::parse(&endpoint)
            .map_err(|e| EstatError::Config(format!("invalid endpoint {:?}: {}", endpoint, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(EstatError::Config(format!(
                "endpoint {:?} cannot be used as a base URL",
                endpoint
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(EstatError::Config(format!(
                "endpoint {:?} must not carry a query or fragment",
                endpoint
            )));
        }

        Ok(Config {
            app_id,
            limit: options.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
            version: options
                .version
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            endpoint,
            timeout: options.timeout,
            debug: options.debug,
        })
    }

    /// Resolve options against the process environment
    pub fn from_env(options: Options) -> Result<Self> {
        Self::resolve(options, |key| std::env::var(key).ok())
    }

    /// Application ID sent with every request
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Configured request limit
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// API version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// API endpoint as configured
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Overall request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether per-request debug logging is enabled
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Get the base URL for API requests: `{endpoint}/{version}/app/json`
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}/app/json",
            self.endpoint.trim_end_matches('/'),
            self.version.trim_matches('/')
        )
    }

    /// Get the URL of a single operation, without query string
    pub fn endpoint_url(&self, operation: &str) -> String {
        format!("{}/{}", self.base_url(), operation)
    }
}

// The application ID is a credential
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &"<redacted>")
            .field("limit", &self.limit)
            .field("version", &self.version)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("debug", &self.debug)
            .finish()
    }
}
