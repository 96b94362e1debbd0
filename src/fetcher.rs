//! Where listing pages come from.

use async_trait::async_trait;

use crate::Result;

/// Source of listing page markup.
///
/// [`MagazineReader`](crate::reader::MagazineReader) asks for one page URL at
/// a time and parses whatever comes back. Network settings belong to the
/// implementation; tests substitute canned pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the body of `url`, or an error if the page could not be
    /// retrieved. An empty listing is a successful fetch.
    async fn fetch(&self, url: &str) -> Result<String>;
}
