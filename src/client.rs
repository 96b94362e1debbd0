//! Elasticsearch REST client.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::backend::{ClusterHealth, SearchBackend, SearchResponse};
use crate::config::ClientConfig;
use crate::{Result, SearchError};

/// HTTP client for an Elasticsearch cluster.
///
/// Requests rotate round-robin over the configured nodes. The client is built
/// once and shared by handing it to an [`ArticleRepository`](crate::ArticleRepository).
pub struct ElasticClient {
    client: Client,
    nodes: Vec<Url>,
    cluster_name: Option<String>,
    current_index: AtomicUsize,
}

#[derive(Deserialize)]
struct Acknowledged {
    #[serde(default)]
    acknowledged: bool,
}

#[derive(Deserialize)]
struct CatIndex {
    index: String,
}

impl ElasticClient {
    /// Creates a client from connection settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.nodes.is_empty() {
            return Err(SearchError::Config("no cluster nodes configured".to_string()));
        }

        let nodes = config
            .nodes
            .iter()
            .map(|node| node.url())
            .collect::<Result<Vec<_>>>()?;

        let mut builder = Client::builder().user_agent("magazine-search/0.1");
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SearchError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            nodes,
            cluster_name: config.cluster_name,
            current_index: AtomicUsize::new(0),
        })
    }

    /// Returns the number of nodes requests rotate over.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn next_node(&self) -> &Url {
        let index = self.current_index.fetch_add(1, Ordering::SeqCst) % self.nodes.len();
        &self.nodes[index]
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.next_node().join(path)?)
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!("{} succeeded with {}", action, status);
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SearchError::Execution(format!(
            "{} failed with {}: {}",
            action, status, body
        )))
    }
}

#[async_trait]
impl SearchBackend for ElasticClient {
    async fn health(&self) -> Result<ClusterHealth> {
        let url = self.endpoint("_cluster/health")?;
        let response = self
            .send(self.client.get(url), "cluster health")
            .await
            .map_err(|e| {
                warn!("Error when obtaining cluster health: {}", e);
                SearchError::Execution("Error when trying to obtain the server status".to_string())
            })?;
        let health: ClusterHealth = response.json().await?;

        if let Some(expected) = &self.cluster_name {
            if expected != &health.cluster_name {
                warn!(
                    "Connected to cluster '{}' but expected '{}'",
                    health.cluster_name, expected
                );
            }
        }

        Ok(health)
    }

    async fn list_indices(&self, pattern: &str) -> Result<Vec<String>> {
        let mut url = self.endpoint(&format!("_cat/indices/{}", pattern))?;
        url.query_pairs_mut().append_pair("format", "json").append_pair("h", "index");

        let response = self.send(self.client.get(url), "list indices").await?;
        let indices: Vec<CatIndex> = response.json().await?;
        Ok(indices.into_iter().map(|entry| entry.index).collect())
    }

    async fn delete_indices(&self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }

        let url = self.endpoint(&names.join(","))?;
        self.send(self.client.delete(url), "delete indices").await?;
        Ok(())
    }

    async fn create_index(&self, name: &str, body: &Value) -> Result<bool> {
        let url = self.endpoint(name)?;
        let response = self
            .send(self.client.put(url).json(body), "create index")
            .await?;
        let ack: Acknowledged = response.json().await?;
        Ok(ack.acknowledged)
    }

    async fn index_document(&self, index: &str, document: &Value) -> Result<()> {
        let url = self.endpoint(&format!("{}/_doc", index))?;
        self.send(self.client.post(url).json(document), "index document")
            .await?;
        Ok(())
    }

    async fn refresh(&self, index: &str) -> Result<()> {
        let url = self.endpoint(&format!("{}/_refresh", index))?;
        self.send(self.client.post(url), "refresh").await?;
        Ok(())
    }

    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse> {
        let url = self.endpoint(&format!("{}/_search", index))?;
        let response = self
            .send(self.client.post(url).json(body), "search")
            .await?;
        Ok(response.json().await?)
    }
}
