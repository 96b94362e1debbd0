//! Connection settings for the search cluster.

use std::time::Duration;

use url::Url;

use crate::{Result, SearchError};

/// Port used when a host is given without one.
pub const DEFAULT_PORT: u16 = 9200;

/// A single cluster node reachable over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAddress {
    /// Node host (IP or domain).
    pub host: String,
    /// HTTP port.
    pub port: u16,
    /// Whether to connect with TLS.
    pub tls: bool,
}

impl NodeAddress {
    /// Creates a plain HTTP node address.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            tls: false,
        }
    }

    /// Parses `host`, `host:port` or a full `http(s)://host:port` URL.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(SearchError::Config("empty host in host list".to_string()));
        }

        if value.contains("://") {
            let url = Url::parse(value)
                .map_err(|e| SearchError::Config(format!("invalid node URL '{}': {}", value, e)))?;
            let tls = match url.scheme() {
                "http" => false,
                "https" => true,
                scheme => {
                    return Err(SearchError::Config(format!(
                        "unsupported scheme '{}' in '{}'",
                        scheme, value
                    )))
                }
            };
            let host = url
                .host_str()
                .ok_or_else(|| SearchError::Config(format!("missing host in '{}'", value)))?;
            let port = url.port().unwrap_or(DEFAULT_PORT);
            return Ok(Self {
                host: host.to_string(),
                port,
                tls,
            });
        }

        match value.split_once(':') {
            Some((host, port)) => {
                let host = host.trim();
                if host.is_empty() {
                    return Err(SearchError::Config(format!("missing host in '{}'", value)));
                }
                let port = port.trim().parse::<u16>().map_err(|_| {
                    SearchError::Config(format!("invalid port in '{}'", value))
                })?;
                Ok(Self::new(host, port))
            }
            None => Ok(Self::new(value, DEFAULT_PORT)),
        }
    }

    /// Returns the base URL of the node.
    pub fn url(&self) -> Result<Url> {
        let scheme = if self.tls { "https" } else { "http" };
        let url = Url::parse(&format!("{}://{}:{}/", scheme, self.host, self.port))?;
        Ok(url)
    }
}

/// Settings used to build an [`ElasticClient`](crate::ElasticClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Nodes requests rotate over.
    pub nodes: Vec<NodeAddress>,
    /// Expected cluster name; a mismatch is logged.
    pub cluster_name: Option<String>,
    /// Per-request timeout, `None` for the transport default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration for a single node.
    pub fn new(node: NodeAddress) -> Self {
        Self {
            nodes: vec![node],
            cluster_name: None,
            timeout: None,
        }
    }

    /// Parses a comma separated host list such as `host1:9200,host2:9200`.
    pub fn from_hosts(hosts: &str) -> Result<Self> {
        let nodes = hosts
            .split(',')
            .map(NodeAddress::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            nodes,
            cluster_name: None,
            timeout: None,
        })
    }

    /// Sets the expected cluster name.
    pub fn with_cluster_name(mut self, cluster_name: impl Into<String>) -> Self {
        self.cluster_name = Some(cluster_name.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(NodeAddress::new("localhost", DEFAULT_PORT))
    }
}
