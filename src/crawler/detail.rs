//! Detail page extraction
//!
//! Turns a paper's abstract page into a [`PaperRecord`]:
//! - title from `<h1 class="title">`, with the "Title:" descriptor removed
//! - comment from `<td class="tablecell comments">`, empty when absent
//! - abstract from `<blockquote class="abstract">`, newlines flattened
//! - optional full text, reached through the "HTML (experimental)" link
//!   and split into sections keyed by their `id` attribute
//!
//! All parsing is done by pure functions over the page text, so nothing
//! non-`Send` is ever held across an await point.

use crate::crawler::{ExtractError, Fetcher};
use crate::record::{PaperRecord, Section};
use crate::urls;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use url::Url;

/// Anchor text that marks the experimental full-text rendering
const FULL_TEXT_LINK_TEXT: &str = "HTML (experimental)";

/// Placeholder title for full-text sections without a heading
const UNTITLED_SECTION: &str = "No title found";

/// Fields parsed out of a detail page
#[derive(Debug, Clone)]
pub struct ParsedDetail {
    /// The paper title, absent when the page carries no usable title
    pub title: Option<String>,

    /// Author comment, empty when the page has none
    pub comment: String,

    /// The abstract with newlines flattened to spaces
    pub abstract_text: Option<String>,

    /// Absolute URL of the full-text rendering, when one is linked
    pub full_text_url: Option<String>,
}

/// Extracts paper records from detail pages
#[derive(Debug, Clone)]
pub struct DetailExtractor {
    fetcher: Fetcher,
    base_url: Url,
}

impl DetailExtractor {
    pub fn new(fetcher: Fetcher, base_url: Url) -> Self {
        Self { fetcher, base_url }
    }

    /// Crawls one paper and assembles its record
    ///
    /// The input URL is canonicalized first, so mirror and export hosts
    /// fold into the configured base. A page without a non-empty title is
    /// an error; every other field degrades gracefully. Full text is
    /// best effort: when the linked page cannot be fetched the record
    /// is still returned, just without `full_content`.
    ///
    /// # Arguments
    ///
    /// * `url` - The paper's detail page URL, in any recognized form
    ///
    /// # Returns
    ///
    /// * `Ok(PaperRecord)` - The assembled record
    /// * `Err(ExtractError)` - The page was unreachable or had no title
    pub async fn extract(&self, url: &str) -> Result<PaperRecord, ExtractError> {
        let paper_url = urls::canonical_paper_url(url, &self.base_url)?;

        let html = self.fetcher.fetch(paper_url.as_str()).await?;
        let detail = parse_detail(&html, &paper_url);

        let title = detail.title.ok_or_else(|| ExtractError::MissingField {
            url: paper_url.to_string(),
            field: "title",
        })?;

        let full_content = match detail.full_text_url {
            Some(full_text_url) => self.fetch_full_content(&full_text_url).await,
            None => None,
        };

        tracing::info!("Crawled paper: {}", title);

        Ok(PaperRecord {
            url: paper_url.to_string(),
            title,
            comment: detail.comment,
            abstract_text: detail.abstract_text,
            full_content,
        })
    }

    async fn fetch_full_content(&self, url: &str) -> Option<BTreeMap<String, Section>> {
        match self.fetcher.fetch(url).await {
            Ok(html) => Some(parse_sections(&html)),
            Err(error) => {
                tracing::warn!("Failed to fetch full text {}: {}", url, error);
                None
            }
        }
    }
}

/// Parses a detail page into its record fields
///
/// # Arguments
///
/// * `html` - The detail page HTML
/// * `page_url` - The page URL, for resolving the full-text href
pub fn parse_detail(html: &str, page_url: &Url) -> ParsedDetail {
    let document = Html::parse_document(html);

    ParsedDetail {
        title: parse_title(&document),
        comment: parse_comment(&document),
        abstract_text: parse_abstract(&document),
        full_text_url: find_full_text_link(&document, page_url),
    }
}

/// Extracts the title, dropping the "Title:" descriptor span text
///
/// A title that is empty after trimming counts as absent.
fn parse_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1.title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .replace("Title:", "")
                .trim()
                .to_string()
        })
        .filter(|title| !title.is_empty())
}

/// Extracts the author comment, or an empty string when the page has none
fn parse_comment(document: &Html) -> String {
    let Ok(selector) = Selector::parse("td.tablecell.comments") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts the abstract as a single line
///
/// The leading "Abstract:" descriptor is stripped and interior newlines
/// are flattened to spaces.
fn parse_abstract(document: &Html) -> Option<String> {
    let selector = Selector::parse("blockquote.abstract").ok()?;
    let element = document.select(&selector).next()?;

    let text = element.text().collect::<String>();
    let text = text.trim();
    let text = text.strip_prefix("Abstract:").unwrap_or(text).trim_start();

    Some(text.replace('\n', " "))
}

/// Finds the link to the experimental full-text rendering
///
/// The link is identified by its exact anchor text. Relative hrefs are
/// resolved against the page URL.
fn find_full_text_link(document: &Html, page_url: &Url) -> Option<String> {
    let selector = Selector::parse("a").ok()?;

    for element in document.select(&selector) {
        if element.text().collect::<String>() != FULL_TEXT_LINK_TEXT {
            continue;
        }

        if let Some(href) = element.value().attr("href") {
            if let Ok(absolute) = page_url.join(href) {
                return Some(absolute.to_string());
            }
        }
    }

    None
}

/// Splits a full-text page into sections keyed by element id
///
/// Every `<section>` carrying an `id` attribute becomes an entry, nested
/// subsections included. The section title comes from its first `<h2>`
/// with numbering spans removed, or a placeholder when there is no
/// heading at all. The content joins the trimmed text of every `<p>`
/// in the section with newlines.
///
/// A page without such sections yields an empty map, which is distinct
/// from a paper that has no full-text page at all.
pub fn parse_sections(html: &str) -> BTreeMap<String, Section> {
    let document = Html::parse_document(html);
    let mut sections = BTreeMap::new();

    let (section_selector, heading_selector, paragraph_selector) = match (
        Selector::parse("section[id]"),
        Selector::parse("h2"),
        Selector::parse("p"),
    ) {
        (Ok(s), Ok(h), Ok(p)) => (s, h, p),
        _ => return sections,
    };

    for section in document.select(&section_selector) {
        let id = match section.value().attr("id") {
            Some(id) => id,
            None => continue,
        };

        let title = match section.select(&heading_selector).next() {
            Some(heading) => heading_text(heading),
            None => UNTITLED_SECTION.to_string(),
        };

        let content = section
            .select(&paragraph_selector)
            .map(|paragraph| paragraph.text().collect::<String>().trim().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        sections.insert(id.to_string(), Section { title, content });
    }

    sections
}

/// Returns heading text with numbering spans removed
///
/// Full-text headings embed their section number in `<span>` tags.
/// Text inside any span under the heading is dropped.
fn heading_text(heading: ElementRef) -> String {
    let mut text = String::new();

    for node in heading.descendants() {
        let fragment = match node.value() {
            scraper::Node::Text(fragment) => fragment,
            _ => continue,
        };

        let in_span = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != heading.id())
            .any(|ancestor| {
                matches!(ancestor.value(), scraper::Node::Element(e) if e.name() == "span")
            });

        if !in_span {
            text.push_str(fragment);
        }
    }

    text.trim().to_string()
}
