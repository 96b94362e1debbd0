//! Article storage and retrieval on top of a search cluster.

use std::sync::Arc;

use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::aggregation::{BucketOrder, TermCounts};
use crate::backend::{ClusterStatus, Hit, SearchBackend};
use crate::query::{search_request, terms_aggregation_request, ArticleQuery, FilterField};
use crate::{Article, Result, SearchError};

/// Alias every query and document goes through.
pub const INDEX_BASE: &str = "articles";

const DEFAULT_MAX_HITS: usize = 100;
const DEFAULT_MAX_BUCKETS: usize = 100;

/// Reads and writes articles through the `articles` alias.
pub struct ArticleRepository {
    backend: Arc<dyn SearchBackend>,
    max_hits: usize,
    max_buckets: usize,
}

impl ArticleRepository {
    /// Creates a repository on top of an already constructed backend.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            max_hits: DEFAULT_MAX_HITS,
            max_buckets: DEFAULT_MAX_BUCKETS,
        }
    }

    /// Sets how many articles a search returns at most.
    pub fn with_max_hits(mut self, max_hits: usize) -> Self {
        self.max_hits = max_hits;
        self
    }

    /// Sets how many distinct values an aggregation returns at most.
    pub fn with_max_buckets(mut self, max_buckets: usize) -> Self {
        self.max_buckets = max_buckets;
        self
    }

    /// Returns the cluster status.
    pub async fn status(&self) -> Result<ClusterStatus> {
        let health = self.backend.health().await?;
        Ok(health.status)
    }

    /// Removes all indexes named `articles-*`.
    pub async fn delete_all_indexes(&self) -> Result<()> {
        let names = self
            .backend
            .list_indices(&format!("{}-*", INDEX_BASE))
            .await?;
        if !names.is_empty() {
            info!("Deleting indexes {:?}", names);
        }
        self.backend.delete_indices(&names).await
    }

    /// Creates `articles-<yyyyMMddHHmmss>` aliased as `articles`.
    ///
    /// The index has a single shard and no replicas. Returns the index name.
    pub async fn create_index(&self) -> Result<String> {
        let name = format!("{}-{}", INDEX_BASE, Local::now().format("%Y%m%d%H%M%S"));

        let acknowledged = self.backend.create_index(&name, &index_definition()).await?;
        if !acknowledged {
            return Err(SearchError::Execution(format!(
                "Create index {} was not acknowledged",
                name
            )));
        }

        info!("Created index {} with alias {}", name, INDEX_BASE);
        Ok(name)
    }

    /// Deletes every article index and creates a fresh, empty one.
    pub async fn reset_index(&self) -> Result<String> {
        self.delete_all_indexes().await?;
        self.create_index().await
    }

    /// Appends an article to the index the alias points at.
    pub async fn index_article(&self, article: &Article) -> Result<()> {
        if !article.has_link() {
            warn!("Indexing article without link: {}", article);
        }
        let document = serde_json::to_value(article)?;
        self.backend.index_document(INDEX_BASE, &document).await
    }

    /// Makes indexed articles visible to searches.
    pub async fn refresh(&self) -> Result<()> {
        self.backend.refresh(INDEX_BASE).await
    }

    /// Searches with an optional exact filter and an optional search term.
    pub async fn search(
        &self,
        filter: Option<(FilterField, &str)>,
        term: Option<&str>,
    ) -> Result<Vec<Article>> {
        let query = ArticleQuery::build(filter, term);
        debug!("Executing {:?}", query);
        self.execute(&query).await
    }

    /// Searches title and description; everything when `term` is empty.
    pub async fn search_articles(&self, term: Option<&str>) -> Result<Vec<Article>> {
        self.search(None, term).await
    }

    /// All articles from one issue.
    pub async fn find_articles_for_issue(&self, issue: &str) -> Result<Vec<Article>> {
        self.search(Some((FilterField::Issue, issue)), None).await
    }

    /// All articles by one author.
    pub async fn find_articles_for_author(&self, author: &str) -> Result<Vec<Article>> {
        self.search(Some((FilterField::Author, author)), None).await
    }

    /// Articles matching `term` restricted to one author or issue.
    pub async fn search_and_filter(
        &self,
        field: FilterField,
        value: &str,
        term: &str,
    ) -> Result<Vec<Article>> {
        self.search(Some((field, value)), Some(term)).await
    }

    /// Counts articles per distinct value of `field`.
    pub async fn aggregate(&self, field: FilterField, order: BucketOrder) -> Result<TermCounts> {
        let name = aggregation_name(field);
        let body = terms_aggregation_request(name, field, self.max_buckets);
        let response = self.backend.search(INDEX_BASE, &body).await?;

        let buckets = response
            .buckets(name)
            .iter()
            .map(|bucket| (bucket.key.clone(), bucket.doc_count));
        Ok(TermCounts::from_buckets(buckets, order))
    }

    /// Issues with their article counts, most articles first.
    pub async fn find_issues(&self) -> Result<TermCounts> {
        self.aggregate(FilterField::Issue, BucketOrder::Engine).await
    }

    /// Authors with their article counts, alphabetically.
    pub async fn find_authors(&self) -> Result<TermCounts> {
        self.aggregate(FilterField::Author, BucketOrder::Key).await
    }

    async fn execute(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let body = search_request(query, self.max_hits);
        let response = self.backend.search(INDEX_BASE, &body).await?;

        let articles = response
            .hits
            .hits
            .iter()
            .filter_map(|hit| match parse_hit(hit) {
                Ok(article) => Some(article),
                Err(e) => {
                    warn!("Dropping hit {}: {}", hit.id, e);
                    None
                }
            })
            .collect();
        Ok(articles)
    }
}

/// Maps a hit's document back to an article.
pub fn parse_hit(hit: &Hit) -> Result<Article> {
    Article::deserialize(&hit.source)
        .map_err(|e| SearchError::Parse(format!("Error parsing article: {}", e)))
}

fn aggregation_name(field: FilterField) -> &'static str {
    match field {
        FilterField::Author => "authors",
        FilterField::Issue => "issues",
    }
}

/// Settings, mapping and alias for a new article index.
pub fn index_definition() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 0
        },
        "mappings": {
            "properties": {
                "title": { "type": "text" },
                "author": { "type": "keyword" },
                "issue": { "type": "keyword" },
                "link": { "type": "keyword" },
                "description": { "type": "text" },
                "postDate": { "type": "date", "format": "yyyy-MM-dd" }
            }
        },
        "aliases": {
            INDEX_BASE: {}
        }
    })
}
