//! Index page parser
//!
//! Extracts candidate leaf links from one A-Z index page.

use crate::crawler::discovery::DiseaseLink;
use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Parses an index page and returns every leaf link on it, in page order
///
/// # Link Extraction Rules
///
/// **Include:** `<a href>` whose target contains the leaf namespace
/// (e.g. `/diseases-conditions/`).
///
/// **Exclude:**
/// - index pages themselves (`/index`)
/// - letter-filtered listings (`?letter=`)
/// - links that do not resolve to an http(s) URL
///
/// Duplicates are kept; the caller dedupes across all index pages.
///
/// # Example
///
/// ```
/// use medref_harvest::crawler::parse_index_page;
/// use url::Url;
///
/// let html = r#"<a href="/diseases-conditions/acne/syc-1">Acne</a>"#;
/// let base = Url::parse("https://example.org/").unwrap();
/// let links = parse_index_page(html, &base, "/diseases-conditions/");
/// assert_eq!(links[0].url, "https://example.org/diseases-conditions/acne/syc-1");
/// ```
pub fn parse_index_page(html: &str, base_url: &Url, namespace: &str) -> Vec<DiseaseLink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if !is_leaf_href(href, namespace) {
                continue;
            }

            if let Some(absolute_url) = resolve_link(href, base_url) {
                let name = element
                    .text()
                    .flat_map(str::split_whitespace)
                    .collect::<Vec<_>>()
                    .join(" ");
                links.push(DiseaseLink::new(name, absolute_url));
            }
        }
    }

    links
}

/// True for hrefs inside the leaf namespace that are not index listings
pub fn is_leaf_href(href: &str, namespace: &str) -> bool {
    href.contains(namespace) && !href.contains("/index") && !href.contains("?letter=")
}
