//! The scrape-and-load run: rebuild the index from the website.

use std::ops::RangeInclusive;

use futures::StreamExt;
use tracing::info;

use crate::reader::MagazineReader;
use crate::repository::ArticleRepository;
use crate::Result;

/// Number of listing pages the website had when the loader was written.
pub const DEFAULT_PAGE_COUNT: u32 = 23;

/// Outcome of a load run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Name of the index that was created.
    pub index: String,
    /// Pages read.
    pub pages: u32,
    /// Articles indexed.
    pub articles: usize,
}

/// Resets the index and loads the given listing pages into it.
///
/// Pages are read and articles indexed strictly one at a time. A page that
/// cannot be fetched stops the run; entries that cannot be parsed are skipped
/// by the reader.
pub async fn load_articles(
    reader: &MagazineReader,
    repository: &ArticleRepository,
    pages: RangeInclusive<u32>,
) -> Result<LoadSummary> {
    let index = repository.reset_index().await?;
    let mut summary = LoadSummary {
        index,
        ..Default::default()
    };

    let mut page_stream = Box::pin(reader.pages(pages));
    while let Some((page, articles)) = page_stream.next().await {
        info!("Start page {}", page);
        let articles = articles?;
        for article in &articles {
            repository.index_article(article).await?;
        }
        summary.pages += 1;
        summary.articles += articles.len();
    }

    repository.refresh().await?;
    info!(
        "Loaded {} articles from {} pages into {}",
        summary.articles, summary.pages, summary.index
    );
    Ok(summary)
}
