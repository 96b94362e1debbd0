//! The search cluster as seen by the repository.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// Cluster health colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStatus {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Red => "RED",
        };
        f.write_str(name)
    }
}

/// Response of the cluster health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterHealth {
    #[serde(default)]
    pub cluster_name: String,
    pub status: ClusterStatus,
}

/// A single search hit with its raw document.
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// One bucket of a terms aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub doc_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermsAggregation {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

/// Response of a `_search` request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Hits,
    #[serde(default)]
    pub aggregations: HashMap<String, TermsAggregation>,
}

impl SearchResponse {
    /// Returns the buckets of the named terms aggregation, empty when absent.
    pub fn buckets(&self, name: &str) -> &[Bucket] {
        self.aggregations
            .get(name)
            .map(|aggregation| aggregation.buckets.as_slice())
            .unwrap_or_default()
    }
}

/// Operations the repository needs from a search cluster.
///
/// Index and alias names are passed verbatim; bodies are Elasticsearch JSON.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Returns the cluster health.
    async fn health(&self) -> Result<ClusterHealth>;

    /// Lists the names of indexes matching a wildcard pattern.
    async fn list_indices(&self, pattern: &str) -> Result<Vec<String>>;

    /// Deletes the named indexes.
    async fn delete_indices(&self, names: &[String]) -> Result<()>;

    /// Creates an index from a settings/mappings/aliases body.
    ///
    /// Returns whether the cluster acknowledged the request.
    async fn create_index(&self, name: &str, body: &Value) -> Result<bool>;

    /// Appends one document to an index or alias.
    async fn index_document(&self, index: &str, document: &Value) -> Result<()>;

    /// Makes recently indexed documents searchable.
    async fn refresh(&self, index: &str) -> Result<()>;

    /// Runs a search request.
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse>;
}
