//! Error types for scraping, indexing and querying articles.

use thiserror::Error;

/// Result type alias for magazine search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while scraping pages or talking to the search cluster.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Connection settings could not be turned into a usable client.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The search cluster rejected a request or did not acknowledge it.
    #[error("Search cluster execution failed: {0}")]
    Execution(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Page content or a document could not be mapped to an article.
    #[error("Failed to parse: {0}")]
    Parse(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Returns true for failures talking to the search cluster.
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_) | Self::Http(_))
    }
}
