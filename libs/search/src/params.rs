//! Request and result shapes for entity queries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Caller-supplied query parameters beyond the expression itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtraQueryParams {
    pub from: Option<u64>,
    pub size: Option<u64>,
    #[serde(default)]
    pub sort: Vec<SortSpec>,
    /// Wildcard segment patterns selecting the fields to populate.
    /// Empty means identifier-only results.
    #[serde(default)]
    pub source: Vec<Vec<String>>,
}

/// Source projection handed to the index after permission checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFilter {
    /// Identifier-only results.
    None,
    /// Populate exactly these resolved field paths.
    Fields(Vec<String>),
}

/// Concrete request forwarded to the index.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub from: Option<u64>,
    pub size: Option<u64>,
    pub sort: Vec<SortSpec>,
    pub source: SourceFilter,
}

/// One shaped hit: the record identifier plus its projected fields.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, JsonValue>,
}

/// Timed and shaped result of an entity query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub took_ms: u64,
    pub timed_out: bool,
    pub total: u64,
    pub hits: Vec<SearchHit>,
}
