//! Reads article listings from the Java Magazine website.

use std::ops::RangeInclusive;
use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::date::parse_long_date;
use crate::fetcher::PageFetcher;
use crate::{Article, Result, SearchError};

/// Listing that is paged through with `?page=N`.
pub const DEFAULT_BASE_URL: &str = "http://www.nljug.org/databasejava/";

/// Issue recorded for entries that only list an author.
pub const UNKNOWN_ISSUE: &str = "unknown";

/// Reads listing pages and maps their entries to articles.
pub struct MagazineReader {
    fetcher: Arc<dyn PageFetcher>,
    base_url: Url,
}

impl MagazineReader {
    /// Creates a reader for [`DEFAULT_BASE_URL`].
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        Self::with_base_url(fetcher, DEFAULT_BASE_URL)
    }

    /// Creates a reader for another listing location.
    pub fn with_base_url(fetcher: Arc<dyn PageFetcher>, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SearchError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        Ok(Self { fetcher, base_url })
    }

    /// URL of a 1-based listing page.
    pub fn page_url(&self, page: u32) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("page", &page.to_string());
        url.into()
    }

    /// Fetches one page and returns its articles in document order.
    pub async fn read_page(&self, page: u32) -> Result<Vec<Article>> {
        let url = self.page_url(page);
        let html = self.fetcher.fetch(&url).await?;
        let articles = parse_listing(&html)?;
        debug!("Page {} yielded {} articles", page, articles.len());
        Ok(articles)
    }

    /// Reads the given pages one after another, lazily.
    pub fn pages(
        &self,
        pages: RangeInclusive<u32>,
    ) -> impl Stream<Item = (u32, Result<Vec<Article>>)> + '_ {
        stream::iter(pages).then(move |page| async move { (page, self.read_page(page).await) })
    }
}

struct Selectors {
    entry: Selector,
    article: Selector,
    heading: Selector,
    header: Selector,
    anchor: Selector,
    meta: Selector,
    span: Selector,
    time: Selector,
    description: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            entry: selector("li.databasejava")?,
            article: selector("article")?,
            heading: selector("h3")?,
            header: selector("header")?,
            anchor: selector("a")?,
            meta: selector("div.meta")?,
            span: selector("span")?,
            time: selector("time")?,
            description: selector(r#"[itemprop="description"]"#)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))
}

/// Maps every listing entry on a page to an article.
///
/// Entries missing their header link, meta block, author or date are logged
/// and skipped; the remaining entries are still returned. A page without
/// entries yields an empty list.
pub fn parse_listing(html: &str) -> Result<Vec<Article>> {
    let document = Html::parse_document(html);
    let selectors = Selectors::new()?;

    let articles = document
        .select(&selectors.entry)
        .enumerate()
        .filter_map(|(position, entry)| match parse_entry(entry, &selectors) {
            Ok(article) => Some(article),
            Err(e) => {
                warn!("Skipping listing entry {}: {}", position + 1, e);
                None
            }
        })
        .collect();

    Ok(articles)
}

fn parse_entry(entry: ElementRef<'_>, selectors: &Selectors) -> Result<Article> {
    let title = entry.select(&selectors.article).next().map(|article| {
        let headings: Vec<String> = article.select(&selectors.heading).map(text_of).collect();
        headings.join(" ")
    });

    let link = entry
        .select(&selectors.header)
        .next()
        .and_then(|header| header.select(&selectors.anchor).next())
        .and_then(|anchor| anchor.value().attr("href"))
        .ok_or_else(|| SearchError::Parse("missing header link".to_string()))?;

    let meta = entry
        .select(&selectors.meta)
        .next()
        .ok_or_else(|| SearchError::Parse("missing meta block".to_string()))?;

    let spans: Vec<ElementRef<'_>> = meta.select(&selectors.span).collect();
    let author = spans
        .first()
        .map(|span| anchors_text(*span, &selectors.anchor))
        .ok_or_else(|| SearchError::Parse("missing author".to_string()))?;
    let issue = spans
        .get(1)
        .map(|span| anchors_text(*span, &selectors.anchor))
        .unwrap_or_else(|| UNKNOWN_ISSUE.to_string());

    let time = meta
        .select(&selectors.time)
        .next()
        .map(text_of)
        .ok_or_else(|| SearchError::Parse("missing post date".to_string()))?;
    let post_date = parse_long_date(&time)?;

    let description = entry.select(&selectors.description).next().map(text_of);

    let mut article = Article::new()
        .with_link(link)
        .with_author(author)
        .with_issue(issue)
        .with_post_date(post_date);
    article.title = title;
    article.description = description;
    Ok(article)
}

/// Element text with whitespace runs collapsed to single spaces.
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn anchors_text(element: ElementRef<'_>, anchor: &Selector) -> String {
    element
        .select(anchor)
        .map(text_of)
        .collect::<Vec<_>>()
        .join(" ")
}
