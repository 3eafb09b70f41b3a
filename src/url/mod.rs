//! Site addressing helpers
//!
//! This module builds index-page URLs, resolves hrefs found on those pages,
//! derives the printable variant of a leaf page, and turns leaf URLs into
//! filesystem-safe slugs for exported artifacts.

use std::fmt::Display;
use url::Url;

/// Builds the URL of one index page, e.g. `{base}diseases-conditions/index?letter=A`
///
/// # Example
///
/// ```
/// use medref_harvest::url::index_url;
/// use url::Url;
///
/// let base = Url::parse("https://example.org/").unwrap();
/// let url = index_url(&base, "diseases-conditions/index", 'B').unwrap();
/// assert_eq!(url.as_str(), "https://example.org/diseases-conditions/index?letter=B");
/// ```
pub fn index_url(base: &Url, index_path: &str, key: impl Display) -> Result<Url, url::ParseError> {
    let mut url = base.join(index_path)?;
    url.query_pairs_mut()
        .append_pair("letter", &key.to_string());
    Ok(url)
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only anchors
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}

/// Appends the printable-rendering query (`p=1` by default) to a leaf URL
pub fn printable_url(url: &str, print_query: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, print_query)
}

/// Extracts the condition slug from a leaf URL
///
/// `https://site/diseases-conditions/acne/symptoms-causes/syc-20368047`
/// yields `acne`.
pub fn disease_slug(url: &str, namespace: &str) -> Option<String> {
    let (_, rest) = url.split_once(namespace)?;
    let slug = rest
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

/// Fallback slug derived from a display name
pub fn name_slug(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '-'
            } else {
                c
            }
        })
        .collect::<String>()
        .to_lowercase()
}

/// Slug naming the artifacts of one harvested page
pub fn artifact_slug(name: &str, url: &str, namespace: &str) -> String {
    disease_slug(url, namespace).unwrap_or_else(|| name_slug(name))
}
