//! Parameter types for the six e-Stat operations.
//!
//! Each struct serializes (via serde) to a flat, ordered map of upstream
//! parameter names. Unset fields are skipped and never reach the query string.

use crate::query::Endpoint;
use crate::request::Method;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Fixed limit sent with dataset registration requests
pub const POST_DATASET_LIMIT: u32 = 1000;

/// Response language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Lang {
    /// Japanese (upstream default)
    #[serde(rename = "J")]
    Japanese,
    /// English
    #[serde(rename = "E")]
    English,
}

/// Yes/no switch used by the `*Flg` parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Flag {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Flag::Yes
        } else {
            Flag::No
        }
    }
}

/// Kind of data searched by `getStatsList`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchKind {
    /// Statistical information (upstream default)
    #[serde(rename = "1")]
    Statistics,
    /// Small area and regional mesh data
    #[serde(rename = "2")]
    SmallArea,
}

/// Aggregation area of the searched data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollectArea {
    #[serde(rename = "1")]
    Nationwide,
    #[serde(rename = "2")]
    Prefecture,
    #[serde(rename = "3")]
    Municipality,
}

/// Visibility of a registered dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpenSpecified {
    /// Only the registering application may use it (upstream default)
    #[serde(rename = "0")]
    Private,
    /// Other users may reference it
    #[serde(rename = "1")]
    Public,
}

/// Dataset registration mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProcessMode {
    /// Register a new dataset or update an existing one (upstream default)
    #[serde(rename = "E")]
    Register,
    /// Delete an existing dataset
    #[serde(rename = "D")]
    Delete,
}

/// Source of statistical data: a registered dataset or a statistical table.
/// Exactly one of the two is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DataSelector {
    /// Dataset ID obtained from `postDataset`
    #[serde(rename = "dataSetId")]
    DataSetId(String),
    /// Statistical table ID obtained from `getStatsList`
    #[serde(rename = "statsDataId")]
    StatsDataId(String),
}

/// Number of a classification axis, always within 1..=15
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CatIndex(u8);

impl CatIndex {
    /// Highest classification number accepted upstream
    pub const MAX: u8 = 15;

    pub fn new(n: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&n).then_some(CatIndex(n))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

/// Classification axis that a [`Narrowing`] applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    /// Tabulation items
    Tab,
    /// Time axis
    Time,
    /// Area axis
    Area,
    /// Classification items 01 to 15
    Cat(CatIndex),
}

impl Axis {
    /// Classification axis `n`, if it is within 1..=15
    pub fn cat(n: u8) -> Option<Self> {
        CatIndex::new(n).map(Axis::Cat)
    }

    /// Suffix used in the upstream parameter names, e.g. `Tab` or `Cat03`
    pub fn name(&self) -> String {
        match self {
            Axis::Tab => "Tab".to_string(),
            Axis::Time => "Time".to_string(),
            Axis::Area => "Area".to_string(),
            Axis::Cat(n) => format!("Cat{:02}", n.get()),
        }
    }
}

/// Filter on one classification axis.
///
/// `level` accepts `X`, `X-X`, `-X` or `X-` where X is a hierarchy level
/// from `getMetaInfo`. `code` is a comma separated list of up to 100 item
/// codes. `from`/`to` bound a code range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Narrowing {
    pub level: Option<String>,
    pub code: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl Narrowing {
    /// Filter by hierarchy level
    pub fn level(level: impl Into<String>) -> Self {
        Narrowing {
            level: Some(level.into()),
            ..Default::default()
        }
    }

    /// Filter by item codes
    pub fn code(code: impl Into<String>) -> Self {
        Narrowing {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    /// Filter by an inclusive code range
    pub fn range(from: impl Into<String>, to: impl Into<String>) -> Self {
        Narrowing {
            from: Some(from.into()),
            to: Some(to.into()),
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }
}

/// Narrowings keyed by axis. Serialized in axis order (Tab, Time, Area,
/// Cat01..Cat15) as `lv{Axis}`, `cd{Axis}`, `cd{Axis}From`, `cd{Axis}To`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Narrowings(BTreeMap<Axis, Narrowing>);

impl Narrowings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the narrowing for an axis, replacing any previous one
    pub fn insert(&mut self, axis: Axis, narrowing: Narrowing) -> Option<Narrowing> {
        self.0.insert(axis, narrowing)
    }

    pub fn get(&self, axis: Axis) -> Option<&Narrowing> {
        self.0.get(&axis)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Narrowings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (axis, narrowing) in &self.0 {
            let name = axis.name();
            if let Some(ref level) = narrowing.level {
                map.serialize_entry(&format!("lv{}", name), level)?;
            }
            if let Some(ref code) = narrowing.code {
                map.serialize_entry(&format!("cd{}", name), code)?;
            }
            if let Some(ref from) = narrowing.from {
                map.serialize_entry(&format!("cd{}From", name), from)?;
            }
            if let Some(ref to) = narrowing.to {
                map.serialize_entry(&format!("cd{}To", name), to)?;
            }
        }
        map.end()
    }
}

/// Parameters of `getStatsList` (statistical table list)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStatsListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,
    /// Survey date: `yyyy`, `yyyymm` or `yyyymm-yyyymm`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_years: Option<String>,
    /// Publication date, same format as `survey_years`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_years: Option<String>,
    /// Statistical field: 2 digits (major) or 4 digits (minor)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_field: Option<String>,
    /// Government statistics code: 5 digits (agency) or 8 digits (survey)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_code: Option<String>,
    /// Keywords, combinable with AND, OR and NOT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_kind: Option<SearchKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_area: Option<CollectArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,
    /// List survey names instead of tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_name_list: Option<Flag>,
    /// 1-based row to start from, usually the previous response's `NEXT_KEY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_position: Option<u64>,
    /// Sent after the leading `limit` pair, which carries the configured limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Update date: `yyyy`, `yyyymm`, `yyyymmdd` or `yyyymmdd-yyyymmdd`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

/// Parameters of `getMetaInfo` (table metadata)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMetaInfoParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,
    pub stats_data_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,
}

impl GetMetaInfoParams {
    pub fn new(stats_data_id: impl Into<String>) -> Self {
        GetMetaInfoParams {
            lang: None,
            stats_data_id: stats_data_id.into(),
            explanation_get_flg: None,
        }
    }
}

/// Parameters of `getStatsData` (statistical data)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStatsDataParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,
    #[serde(flatten)]
    pub selector: DataSelector,
    #[serde(flatten)]
    pub narrowings: Narrowings,
    /// 1-based row to start from, usually the previous response's `NEXT_KEY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_position: Option<u64>,
    /// Sent after the leading `limit` pair, which carries the configured limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Include metadata with the data (upstream default Y)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_get_flg: Option<Flag>,
    /// Only return the row count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnt_get_flg: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_get_flg: Option<Flag>,
    /// Replacement of special characters in values, 0 to 3
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_sp_char: Option<u8>,
    /// 1: include section headers, 2: omit them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_header_flg: Option<u8>,
}

impl GetStatsDataParams {
    pub fn new(selector: DataSelector) -> Self {
        GetStatsDataParams {
            lang: None,
            selector,
            narrowings: Narrowings::new(),
            start_position: None,
            limit: None,
            meta_get_flg: None,
            cnt_get_flg: None,
            explanation_get_flg: None,
            annotation_get_flg: None,
            replace_sp_char: None,
            section_header_flg: None,
        }
    }

    /// Data of a statistical table
    pub fn stats_data(stats_data_id: impl Into<String>) -> Self {
        Self::new(DataSelector::StatsDataId(stats_data_id.into()))
    }

    /// Data of a registered dataset
    pub fn data_set(data_set_id: impl Into<String>) -> Self {
        Self::new(DataSelector::DataSetId(data_set_id.into()))
    }

    pub fn narrow(mut self, axis: Axis, narrowing: Narrowing) -> Self {
        self.narrowings.insert(axis, narrowing);
        self
    }
}

/// Parameters of `postDataset` (dataset registration)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDatasetParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,
    #[serde(flatten)]
    pub selector: DataSelector,
    #[serde(flatten)]
    pub narrowings: Narrowings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_specified: Option<OpenSpecified>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_mode: Option<ProcessMode>,
    /// Name or description, up to 256 full-width characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_name: Option<String>,
}

impl PostDatasetParams {
    pub fn new(selector: DataSelector) -> Self {
        PostDatasetParams {
            lang: None,
            selector,
            narrowings: Narrowings::new(),
            open_specified: None,
            process_mode: None,
            data_set_name: None,
        }
    }

    pub fn narrow(mut self, axis: Axis, narrowing: Narrowing) -> Self {
        self.narrowings.insert(axis, narrowing);
        self
    }
}

/// Parameters of `refDataset` (dataset reference)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefDatasetParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,
    /// Omit to list every dataset available to the application
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_area: Option<CollectArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,
}

/// Parameters of `getDataCatalog` (data catalog)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDataCatalogParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_years: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_years: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_area: Option<CollectArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_get_flg: Option<Flag>,
    /// Comma separated list of XLS, CSV, PDF, XML, XLS_REP, DB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_position: Option<u64>,
    /// Sent after the leading `limit` pair, which carries the configured limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

impl Endpoint for GetStatsListParams {
    const OPERATION: &'static str = "getStatsList";
}

impl Endpoint for GetMetaInfoParams {
    const OPERATION: &'static str = "getMetaInfo";
}

impl Endpoint for GetStatsDataParams {
    const OPERATION: &'static str = "getStatsData";
}

impl Endpoint for PostDatasetParams {
    const OPERATION: &'static str = "postDataset";
    const METHOD: Method = Method::Post;

    fn limit(&self, _configured: u32) -> u32 {
        POST_DATASET_LIMIT
    }
}

impl Endpoint for RefDatasetParams {
    const OPERATION: &'static str = "refDataset";
}

impl Endpoint for GetDataCatalogParams {
    const OPERATION: &'static str = "getDataCatalog";
}
