//! Article record as scraped from the magazine listing and stored in the index.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single magazine article.
///
/// Every field is optional. Articles that are persisted should carry a `link`,
/// but nothing enforces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Article title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// First listed author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Magazine issue the article was published in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    /// Link to the full article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Short description shown in the listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Publication date, stored as `yyyy-MM-dd`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_date: Option<NaiveDate>,
}

impl Article {
    /// Creates an empty article.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the issue.
    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into());
        self
    }

    /// Sets the link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the publication date.
    pub fn with_post_date(mut self, post_date: NaiveDate) -> Self {
        self.post_date = Some(post_date);
        self
    }

    /// Returns true when the article has a non-empty link.
    pub fn has_link(&self) -> bool {
        self.link.as_deref().is_some_and(|link| !link.is_empty())
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn author_or_default(&self) -> &str {
        self.author.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Article{{title='{}', author='{}', issue='{}', link='{}', description='{}', postDate={}}}",
            self.title_or_default(),
            self.author_or_default(),
            self.issue.as_deref().unwrap_or_default(),
            self.link.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default(),
            self.post_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| "null".to_string()),
        )
    }
}
