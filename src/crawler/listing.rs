//! Listing page extraction
//!
//! A field's recent-submissions page lays out papers as alternating
//! `<dt>`/`<dd>` pairs inside a definition list:
//! - `<dt>` carries the identifier links, including the abstract link
//! - `<dd>` carries inline metadata (title, authors)
//!
//! Only the abstract link is read here. Paper metadata comes from the
//! detail page itself, so a listing entry resolves to just a URL.

use crate::crawler::{ExtractError, Fetcher};
use crate::urls;
use scraper::{Html, Selector};
use url::Url;

/// Extracts paper detail URLs from listing pages
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    fetcher: Fetcher,
    base_url: Url,
}

impl ListingExtractor {
    pub fn new(fetcher: Fetcher, base_url: Url) -> Self {
        Self { fetcher, base_url }
    }

    /// Fetches the recent-submissions listing for a field
    ///
    /// # Arguments
    ///
    /// * `field` - The subject field identifier (e.g. "cs.AI")
    /// * `max_papers` - Upper bound on returned URLs
    ///
    /// # Returns
    ///
    /// Detail page URLs in document order, at most `max_papers` of them.
    /// An empty page yields an empty vector, not an error.
    pub async fn extract(
        &self,
        field: &str,
        max_papers: usize,
    ) -> Result<Vec<String>, ExtractError> {
        let listing_url = urls::listing_url(&self.base_url, field, max_papers)?;

        tracing::info!("Fetching {} listing: {}", field, listing_url);

        let html = self.fetcher.fetch(listing_url.as_str()).await?;
        let paper_urls = parse_listing(&html, &listing_url, max_papers);

        tracing::info!("Found {} papers in {} listing", paper_urls.len(), field);

        Ok(paper_urls)
    }
}

/// Parses a listing page and extracts paper detail URLs
///
/// Entries are `<dt>`/`<dd>` pairs; a trailing `<dt>` with no `<dd>`
/// partner is not an entry and is ignored. Within each entry the link
/// titled "Abstract" identifies the paper. Entries without one (header
/// rows, cross-listing stubs) are skipped.
///
/// # Arguments
///
/// * `html` - The listing page HTML
/// * `page_url` - The listing page URL, for resolving relative hrefs
/// * `max_count` - Upper bound on extracted URLs
///
/// # Returns
///
/// Absolute detail page URLs in document order
pub fn parse_listing(html: &str, page_url: &Url, max_count: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut paper_urls = Vec::new();

    let (dt_selector, dd_selector, link_selector) = match (
        Selector::parse("dt"),
        Selector::parse("dd"),
        Selector::parse(r#"a[title="Abstract"]"#),
    ) {
        (Ok(dt), Ok(dd), Ok(link)) => (dt, dd, link),
        _ => return paper_urls,
    };

    let dt_tags: Vec<_> = document.select(&dt_selector).collect();
    let dd_tags: Vec<_> = document.select(&dd_selector).collect();

    for (dt, _dd) in dt_tags.into_iter().zip(dd_tags) {
        if paper_urls.len() >= max_count {
            break;
        }

        let link = match dt.select(&link_selector).next() {
            Some(link) => link,
            None => {
                let entry = dt.text().collect::<String>();
                tracing::debug!(
                    "Skipping listing entry without an abstract link: {}",
                    entry.trim()
                );
                continue;
            }
        };

        let href = match link.value().attr("href") {
            Some(href) => href,
            None => {
                let entry = link.text().collect::<String>();
                tracing::warn!("Skipping abstract link without an href: {}", entry.trim());
                continue;
            }
        };

        match page_url.join(href) {
            Ok(absolute) => paper_urls.push(absolute.to_string()),
            Err(_) => {
                tracing::warn!("Skipping malformed listing href: {}", href);
            }
        }
    }

    paper_urls
}
