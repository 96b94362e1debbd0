//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};

use magazine_search::{
    Article, ArticleRepository, ClusterHealth, ClusterStatus, Result, SearchBackend,
    SearchError, SearchResponse,
};

#[derive(Default)]
struct Index {
    documents: Vec<Value>,
    searchable: usize,
}

#[derive(Default)]
struct State {
    indices: BTreeMap<String, Index>,
    aliases: HashMap<String, String>,
}

/// In-process stand-in for a single-node cluster.
///
/// Understands the query shapes the repository sends: `match_all`, `term`,
/// `multi_match` (lowercased word tokens, any token matches) and `bool` with
/// `must`/`filter`, plus `terms` aggregations. Documents become searchable
/// after `refresh`, like on a real cluster.
#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index_names(&self) -> Vec<String> {
        self.state.lock().unwrap().indices.keys().cloned().collect()
    }

    pub fn alias_target(&self, alias: &str) -> Option<String> {
        self.state.lock().unwrap().aliases.get(alias).cloned()
    }

    pub fn document_count(&self, index: &str) -> usize {
        let state = self.state.lock().unwrap();
        let name = state.aliases.get(index).map(String::as_str).unwrap_or(index);
        state
            .indices
            .get(name)
            .map(|index| index.documents.len())
            .unwrap_or(0)
    }
}

fn resolve(state: &State, index: &str) -> Result<String> {
    let name = state
        .aliases
        .get(index)
        .cloned()
        .unwrap_or_else(|| index.to_string());
    if state.indices.contains_key(&name) {
        Ok(name)
    } else {
        Err(SearchError::Execution(format!(
            "index_not_found_exception: {}",
            index
        )))
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matches(query: &Value, document: &Value) -> bool {
    if query.get("match_all").is_some() {
        return true;
    }

    if let Some(term) = query.get("term").and_then(Value::as_object) {
        return term
            .iter()
            .all(|(field, value)| document.get(field) == Some(value));
    }

    if let Some(multi_match) = query.get("multi_match") {
        let wanted = tokens(multi_match["query"].as_str().unwrap_or_default());
        let fields = multi_match["fields"].as_array().cloned().unwrap_or_default();
        return fields.iter().filter_map(Value::as_str).any(|field| {
            let present = tokens(document[field].as_str().unwrap_or_default());
            wanted.iter().any(|token| present.contains(token))
        });
    }

    if let Some(bool_query) = query.get("bool") {
        let clauses = |name: &str| bool_query[name].as_array().cloned().unwrap_or_default();
        return clauses("must").iter().all(|clause| matches(clause, document))
            && clauses("filter").iter().all(|clause| matches(clause, document));
    }

    panic!("unsupported query: {}", query);
}

#[async_trait]
impl SearchBackend for InMemoryBackend {
    async fn health(&self) -> Result<ClusterHealth> {
        Ok(ClusterHealth {
            cluster_name: "in-memory".to_string(),
            status: ClusterStatus::Green,
        })
    }

    async fn list_indices(&self, pattern: &str) -> Result<Vec<String>> {
        let prefix = pattern.trim_end_matches('*');
        let state = self.state.lock().unwrap();
        Ok(state
            .indices
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete_indices(&self, names: &[String]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        for name in names {
            state.indices.remove(name);
            state.aliases.retain(|_, target| target != name);
        }
        Ok(())
    }

    async fn create_index(&self, name: &str, body: &Value) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        if state.indices.contains_key(name) {
            return Err(SearchError::Execution(format!(
                "resource_already_exists_exception: {}",
                name
            )));
        }
        state.indices.insert(name.to_string(), Index::default());
        if let Some(aliases) = body["aliases"].as_object() {
            for alias in aliases.keys() {
                state.aliases.insert(alias.clone(), name.to_string());
            }
        }
        Ok(true)
    }

    async fn index_document(&self, index: &str, document: &Value) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let name = resolve(&state, index)?;
        if let Some(index) = state.indices.get_mut(&name) {
            index.documents.push(document.clone());
        }
        Ok(())
    }

    async fn refresh(&self, index: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let name = resolve(&state, index)?;
        if let Some(index) = state.indices.get_mut(&name) {
            index.searchable = index.documents.len();
        }
        Ok(())
    }

    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse> {
        let state = self.state.lock().unwrap();
        let name = resolve(&state, index)?;
        let index = &state.indices[&name];

        let match_all = json!({ "match_all": {} });
        let query = body.get("query").unwrap_or(&match_all);
        let matching: Vec<&Value> = index.documents[..index.searchable]
            .iter()
            .filter(|document| matches(query, document))
            .collect();

        let size = body["size"].as_u64().unwrap_or(10) as usize;
        let hits: Vec<Value> = matching
            .iter()
            .take(size)
            .enumerate()
            .map(|(position, document)| json!({ "_id": position.to_string(), "_source": document }))
            .collect();

        let mut aggregations = serde_json::Map::new();
        if let Some(aggs) = body["aggs"].as_object() {
            for (agg_name, agg) in aggs {
                let field = agg["terms"]["field"].as_str().unwrap_or_default();
                let limit = agg["terms"]["size"].as_u64().unwrap_or(10) as usize;

                let mut counts: BTreeMap<String, u64> = BTreeMap::new();
                for document in &matching {
                    if let Some(value) = document[field].as_str() {
                        *counts.entry(value.to_string()).or_default() += 1;
                    }
                }
                let mut buckets: Vec<(String, u64)> = counts.into_iter().collect();
                buckets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                let buckets: Vec<Value> = buckets
                    .into_iter()
                    .take(limit)
                    .map(|(key, doc_count)| json!({ "key": key, "doc_count": doc_count }))
                    .collect();
                aggregations.insert(agg_name.clone(), json!({ "buckets": buckets }));
            }
        }

        Ok(serde_json::from_value(json!({
            "hits": { "hits": hits },
            "aggregations": aggregations
        }))?)
    }
}

pub fn article(title: &str, author: &str, description: &str, link: &str, issue: &str) -> Article {
    Article::new()
        .with_title(title)
        .with_author(author)
        .with_description(description)
        .with_link(link)
        .with_issue(issue)
        .with_post_date(NaiveDate::from_ymd_opt(2017, 6, 15).unwrap())
}

/// The five articles used throughout the repository scenarios.
pub fn test_articles() -> Vec<Article> {
    vec![
        article("Test Bob", "Author 1", "Description about the man Bob", "/link/bob", "issue1"),
        article("Test Alice", "Author 2", "Description about the woman Alice", "/link/alice", "issue1"),
        article("Test Christian", "Author 1", "Description about the man Christian", "/link/christian", "issue2"),
        article("Test Angelina", "Author 3", "Description about the woman Angelina", "/link/angelina", "issue2"),
        article("Test Christa", "Author 3", "Description about the woman Christa", "/link/christa", "issue3"),
    ]
}

/// A fresh index holding [`test_articles`], refreshed and ready to query.
pub async fn seeded_repository() -> (Arc<InMemoryBackend>, ArticleRepository) {
    let backend = Arc::new(InMemoryBackend::new());
    let repository = ArticleRepository::new(backend.clone());

    repository.reset_index().await.unwrap();
    for article in test_articles() {
        repository.index_article(&article).await.unwrap();
    }
    repository.refresh().await.unwrap();

    (backend, repository)
}
