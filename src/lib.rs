//! # estat - e-Stat REST API client for Rust
//!
//! A client for the [e-Stat](https://www.e-stat.go.jp/) government
//! statistics API. Typed parameter structs are serialized into the query
//! string, sent to one of six fixed endpoints, and the JSON body comes back
//! untouched.
//!
//! ## Features
//!
//! - One typed parameter struct per operation, bound to its endpoint
//! - `dataSetId` / `statsDataId` as a single [`DataSelector`] enum
//! - Application ID from options or the `ESTAT_APP_ID` environment variable
//! - Blocking client (feature `blocking`, default) and async client
//!   (feature `async`)
//!
//! ## Basic Usage
//!
//! ```no_run
//! use estat::{Client, GetStatsDataParams, GetStatsListParams, Options};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Application ID from ESTAT_APP_ID
//!     let client = Client::new(Options::new())?;
//!
//!     let list = client.get_stats_list(&GetStatsListParams {
//!         limit: Some(1),
//!         ..Default::default()
//!     })?;
//!     println!("{:?}", list.get("GET_STATS_LIST/DATALIST_INF/NUMBER"));
//!
//!     let data = client.get_stats_data(&GetStatsDataParams::stats_data("0003001568"))?;
//!     println!("status {:?}, next page at {:?}", data.status(), data.next_key());
//!     Ok(())
//! }
//! ```
//!
//! ## Narrowing
//!
//! ```no_run
//! use estat::{Axis, Client, GetStatsDataParams, Narrowing, Options};
//!
//! let client = Client::new(Options::new().with_app_id("my-app-id").with_limit(100))?;
//! let cat01 = Axis::cat(1).expect("classifications run from 01 to 15");
//! let params = GetStatsDataParams::stats_data("0003001568")
//!     .narrow(Axis::Area, Narrowing::code("13000"))
//!     .narrow(cat01, Narrowing::level("1-2"));
//! let data = client.get_stats_data(&params)?;
//! # Ok::<(), estat::EstatError>(())
//! ```

#[cfg(feature = "blocking")]
pub mod blocking;
pub mod config;
pub mod error;
#[cfg(feature = "async")]
pub mod nonblocking;
pub mod params;
pub mod query;
pub mod request;
pub mod response;

// Re-export main types for convenience
#[cfg(feature = "blocking")]
pub use blocking::Client;
pub use config::{Config, Options, APP_ID_ENV, DEFAULT_ENDPOINT, DEFAULT_LIMIT, DEFAULT_VERSION};
pub use error::{EstatError, Result};
#[cfg(feature = "async")]
pub use nonblocking::AsyncClient;
pub use params::{
    Axis, CatIndex, CollectArea, DataSelector, Flag, GetDataCatalogParams, GetMetaInfoParams,
    GetStatsDataParams, GetStatsListParams, Lang, Narrowing, Narrowings, OpenSpecified,
    PostDatasetParams, ProcessMode, RefDatasetParams, SearchKind,
};
pub use query::{to_query_string, Endpoint, Param};
pub use request::{Method, PreparedRequest};
pub use response::Response;

// Re-export serde_json for convenience
pub use serde_json::json;
