use crate::config::Config;
use crate::error::Result;
use crate::query::{to_query_string, Endpoint};
use serde::Serialize;
use url::Url;

/// Content type announced by POST operations
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A request described as plain data, ready to be sent by a client
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    /// Operation name, e.g. `getStatsList`
    pub operation: String,
    /// Full URL including the query string
    pub url: Url,
    /// Content type header, set for POST operations
    pub content_type: Option<&'static str>,
}

impl PreparedRequest {
    /// Prepare the request for a typed operation
    pub fn new<P: Endpoint>(config: &Config, params: &P) -> Result<Self> {
        let limit = params.limit(config.limit());
        Self::build(config, P::OPERATION, P::METHOD, limit, params)
    }

    /// Prepare a request for an arbitrary operation using the configured limit
    pub fn raw<P>(config: &Config, operation: &str, method: Method, params: &P) -> Result<Self>
    where
        P: Serialize + ?Sized,
    {
        Self::build(config, operation, method, config.limit(), params)
    }

    fn build<P>(
        config: &Config,
        operation: &str,
        method: Method,
        limit: u32,
        params: &P,
    ) -> Result<Self>
    where
        P: Serialize + ?Sized,
    {
        let query = to_query_string(config.app_id(), limit, params)?;
        let mut url = Url::parse(&config.endpoint_url(operation))?;
        url.set_query(Some(&query));

        Ok(PreparedRequest {
            method,
            operation: operation.to_string(),
            url,
            content_type: match method {
                Method::Post => Some(FORM_CONTENT_TYPE),
                Method::Get => None,
            },
        })
    }

    /// URL without the query string, safe to log
    pub fn loggable_url(&self) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.to_string()
    }
}
