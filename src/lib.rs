//! # magazine-search
//!
//! Scrapes the Java Magazine article listing, stores the articles in an
//! Elasticsearch index and answers questions about them:
//!
//! - which authors and issues exist, and how many articles each has
//! - which articles belong to an author or an issue
//! - free-text search over titles and descriptions, optionally filtered
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use magazine_search::{ArticleRepository, ClientConfig, ElasticClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ElasticClient::new(ClientConfig::from_hosts("localhost:9200")?)?;
//!     let repository = ArticleRepository::new(Arc::new(client));
//!
//!     for article in repository.search_articles(Some("java")).await? {
//!         println!("{}", article.title_or_default());
//!     }
//!     Ok(())
//! }
//! ```

mod aggregation;
mod article;
mod backend;
mod client;
mod config;
mod error;
mod query;
mod repository;

pub mod date;
pub mod fetcher;
pub mod fetcher_http;
pub mod loader;
pub mod menu;
pub mod reader;

pub use aggregation::{BucketOrder, TermCount, TermCounts};
pub use article::Article;
pub use backend::{
    Bucket, ClusterHealth, ClusterStatus, Hit, Hits, SearchBackend, SearchResponse,
    TermsAggregation,
};
pub use client::ElasticClient;
pub use config::{ClientConfig, NodeAddress, DEFAULT_PORT};
pub use error::{Result, SearchError};
pub use query::{search_request, terms_aggregation_request, ArticleQuery, FilterField, TEXT_FIELDS};
pub use repository::{index_definition, parse_hit, ArticleRepository, INDEX_BASE};
