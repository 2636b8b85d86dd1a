use crate::config::{create_rest_client, Config, Options};
use crate::error::{EstatError, Result};
use crate::params::{
    GetDataCatalogParams, GetMetaInfoParams, GetStatsDataParams, GetStatsListParams,
    PostDatasetParams, RefDatasetParams,
};
use crate::query::{Endpoint, Param};
use crate::request::{Method, PreparedRequest};
use crate::response::Response;
use reqwest::header::CONTENT_TYPE;

/// Synchronous e-Stat client.
///
/// Holds the resolved [`Config`] and a pooled HTTP client; neither changes
/// after construction, so a `Client` can be shared across threads.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    config: Config,
}

impl Client {
    /// Create a client from options, falling back to `ESTAT_APP_ID` for the
    /// application ID
    ///
    /// # Errors
    /// [`EstatError::MissingAppId`] if no application ID can be resolved.
    pub fn new(options: Options) -> Result<Self> {
        Self::with_config(Config::from_env(options)?)
    }

    /// Create a client from an already resolved configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Client {
            http: create_rest_client(&config)?,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Statistical table list (`getStatsList`)
    pub fn get_stats_list(&self, params: &GetStatsListParams) -> Result<Response> {
        self.call(params)
    }

    /// Metadata of a statistical table (`getMetaInfo`)
    pub fn get_meta_info(&self, params: &GetMetaInfoParams) -> Result<Response> {
        self.call(params)
    }

    /// Statistical data (`getStatsData`)
    pub fn get_stats_data(&self, params: &GetStatsDataParams) -> Result<Response> {
        self.call(params)
    }

    /// Dataset registration (`postDataset`). All parameters travel in the
    /// query string; the form-encoded body is empty.
    pub fn post_dataset(&self, params: &PostDatasetParams) -> Result<Response> {
        self.call(params)
    }

    /// Dataset reference (`refDataset`)
    pub fn ref_dataset(&self, params: &RefDatasetParams) -> Result<Response> {
        self.call(params)
    }

    /// Data catalog (`getDataCatalog`)
    pub fn get_data_catalog(&self, params: &GetDataCatalogParams) -> Result<Response> {
        self.call(params)
    }

    /// Call the operation bound to the parameter type
    pub fn call<P: Endpoint>(&self, params: &P) -> Result<Response> {
        let request = PreparedRequest::new(&self.config, params)?;
        self.execute(request)
    }

    /// Call an operation by name with free-form parameters
    pub fn call_raw(&self, operation: &str, method: Method, params: &Param) -> Result<Response> {
        let request = PreparedRequest::raw(&self.config, operation, method, params)?;
        self.execute(request)
    }

    /// Send a prepared request and parse the JSON body
    pub fn execute(&self, request: PreparedRequest) -> Result<Response> {
        let mut builder = self
            .http
            .request(request.method.into(), request.url.as_str());
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        let start = std::time::Instant::now();
        let http_response = builder.send()?;
        let status = http_response.status();
        let body = http_response.bytes()?;

        if self.config.debug() {
            tracing::debug!(
                method = request.method.as_str(),
                url = %request.loggable_url(),
                status = status.as_u16(),
                elapsed = ?start.elapsed(),
                "e-Stat request"
            );
        } else {
            tracing::trace!(operation = %request.operation, status = status.as_u16(), "e-Stat request");
        }

        if !status.is_success() {
            return Err(EstatError::http(
                status.as_u16(),
                String::from_utf8_lossy(&body).to_string(),
            ));
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
