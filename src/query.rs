//! Article query construction.
//!
//! Deciding which request shape to send is kept separate from sending it:
//! [`ArticleQuery::build`] is a pure function over the user's inputs and
//! [`ArticleQuery::to_dsl`] renders the chosen shape as Elasticsearch query JSON.

use std::fmt;

use serde_json::{json, Value};

/// Fields searched by free-text queries.
pub const TEXT_FIELDS: [&str; 2] = ["title", "description"];

/// Categorical fields articles can be filtered and grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Author,
    Issue,
}

impl FilterField {
    /// Name of the keyword field in the index.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Issue => "issue",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shape of an article search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleQuery {
    /// Every article.
    MatchAll,
    /// Scored match of `term` against the text fields.
    TextSearch {
        term: String,
        fields: Vec<String>,
    },
    /// Exact keyword match on one field.
    ExactFilter { field: FilterField, value: String },
    /// Scored text match restricted by a non-scoring exact filter.
    CombinedFilterAndSearch {
        field: FilterField,
        value: String,
        term: String,
    },
}

impl ArticleQuery {
    /// Chooses the query shape for an optional filter and an optional search term.
    ///
    /// Absent and zero-length strings count as empty. Whitespace is kept as is,
    /// so `" "` is a search term.
    pub fn build(filter: Option<(FilterField, &str)>, term: Option<&str>) -> Self {
        let filter = filter.filter(|(_, value)| !value.is_empty());
        let term = term.filter(|term| !term.is_empty());

        match (filter, term) {
            (None, None) => Self::MatchAll,
            (Some((field, value)), None) => Self::ExactFilter {
                field,
                value: value.to_string(),
            },
            (None, Some(term)) => Self::text_search(term),
            (Some((field, value)), Some(term)) => Self::CombinedFilterAndSearch {
                field,
                value: value.to_string(),
                term: term.to_string(),
            },
        }
    }

    /// Free-text search over [`TEXT_FIELDS`].
    pub fn text_search(term: impl Into<String>) -> Self {
        Self::TextSearch {
            term: term.into(),
            fields: text_fields(),
        }
    }

    /// Renders the query part of a search request.
    pub fn to_dsl(&self) -> Value {
        match self {
            Self::MatchAll => json!({ "match_all": {} }),
            Self::TextSearch { term, fields } => multi_match(term, fields),
            Self::ExactFilter { field, value } => term_query(*field, value),
            Self::CombinedFilterAndSearch { field, value, term } => json!({
                "bool": {
                    "must": [multi_match(term, &text_fields())],
                    "filter": [term_query(*field, value)]
                }
            }),
        }
    }
}

fn text_fields() -> Vec<String> {
    TEXT_FIELDS.iter().map(|field| field.to_string()).collect()
}

fn multi_match(term: &str, fields: &[String]) -> Value {
    json!({
        "multi_match": {
            "query": term,
            "fields": fields
        }
    })
}

fn term_query(field: FilterField, value: &str) -> Value {
    json!({ "term": { field.as_str(): value } })
}

/// Body for `_search` returning up to `size` documents.
pub fn search_request(query: &ArticleQuery, size: usize) -> Value {
    json!({
        "size": size,
        "query": query.to_dsl()
    })
}

/// Body for a `terms` aggregation named `name` over `field`, without hits.
pub fn terms_aggregation_request(name: &str, field: FilterField, buckets: usize) -> Value {
    json!({
        "size": 0,
        "aggs": {
            name: {
                "terms": {
                    "field": field.as_str(),
                    "size": buckets
                }
            }
        }
    })
}
