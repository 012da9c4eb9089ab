//! URL construction and canonicalization for the paper index

use crate::UrlError;
use url::Url;

/// Path prefix that marks a paper's abstract (detail) page
const ABSTRACT_PATH_PREFIX: &str = "/abs/";

/// Rewrites an abstract-page URL into its canonical form under `base`
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. If the path does not start with `/abs/`, return the URL unchanged
/// 3. Otherwise rebuild it as `{base}/abs/{identifier}`, dropping any query
///    string and fragment
///
/// The rewrite is idempotent: applying it to an already-canonical URL yields
/// the same URL. Mirror hosts collapse onto `base`, so the canonical form is
/// stable enough to serve as a storage key.
///
/// # Arguments
///
/// * `url_str` - The URL string to canonicalize
/// * `base` - The index base URL (e.g. `https://arxiv.org`)
///
/// # Returns
///
/// * `Ok(Url)` - Canonical URL
/// * `Err(UrlError)` - Failed to parse or rebuild the URL
///
/// # Examples
///
/// ```
/// use paper_lantern::urls::canonical_paper_url;
/// use url::Url;
///
/// let base = Url::parse("https://arxiv.org").unwrap();
/// let url = canonical_paper_url("http://export.arxiv.org/abs/2401.00001?context=cs#sec", &base).unwrap();
/// assert_eq!(url.as_str(), "https://arxiv.org/abs/2401.00001");
/// ```
pub fn canonical_paper_url(url_str: &str, base: &Url) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    let Some(paper_id) = url.path().strip_prefix(ABSTRACT_PATH_PREFIX) else {
        return Ok(url);
    };

    if paper_id.is_empty() {
        return Err(UrlError::Malformed(format!(
            "No paper identifier in {}",
            url_str
        )));
    }

    base.join(&format!("{}{}", ABSTRACT_PATH_PREFIX, paper_id))
        .map_err(|e| UrlError::Malformed(format!("Failed to canonicalize {}: {}", url_str, e)))
}

/// Builds the listing URL for a subject field
///
/// The listing always covers the current past-week window from offset zero;
/// `show` bounds how many entries the index is asked to render.
///
/// # Arguments
///
/// * `base` - The index base URL
/// * `field` - Subject field token (e.g. `cs.AI`)
/// * `show` - Maximum number of entries to request
///
/// # Returns
///
/// * `Ok(Url)` - The listing URL
/// * `Err(UrlError)` - The field token produced an unjoinable path
pub fn listing_url(base: &Url, field: &str, show: usize) -> Result<Url, UrlError> {
    let mut url = base
        .join(&format!("/list/{}/pastweek", field))
        .map_err(|e| UrlError::Malformed(format!("Failed to build listing URL: {}", e)))?;
    url.set_query(Some(&format!("skip=0&show={}", show)));
    Ok(url)
}
