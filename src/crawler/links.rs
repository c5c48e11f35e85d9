//! HTML link extraction for archive and dataset pages
//!
//! Archive pages link to datasets, dataset pages link to reaction records
//! and, when a dataset spans several pages, to the following page.

use crate::url::{path_has_prefix, resolve_link};
use scraper::{Html, Selector};
use url::Url;

/// Anchor texts that mark a link to the following page
const NEXT_PAGE_TEXTS: &[&str] = &["next", ">", "»"];

/// Links found on a listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Links whose path starts with the requested prefix, in document order
    pub links: Vec<Url>,

    /// Link to the following page, if the page has one
    pub next_page: Option<Url>,
}

/// Parses a listing page and extracts matching links plus pagination
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL, for resolving relative links
/// * `path_prefix` - Only links whose resolved path starts with this are kept
pub fn parse_listing(html: &str, base_url: &Url, path_prefix: &str) -> ListingPage {
    let document = Html::parse_document(html);

    ListingPage {
        links: select_links(&document, base_url, path_prefix),
        next_page: find_next_page(&document, base_url),
    }
}

/// Returns every anchor target whose path starts with `path_prefix`
///
/// Links keep document order and duplicates are retained. A page without
/// matching anchors yields an empty list.
///
/// # Example
///
/// ```
/// use crd_scraper::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/id/1">1</a><a href="/about">About</a><a href="/id/2">2</a>"#;
/// let base = Url::parse("https://example.com/data/reaction/doi/10.1/x").unwrap();
/// let links = extract_links(html, &base, "/id/");
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[0].path(), "/id/1");
/// ```
pub fn extract_links(html: &str, base_url: &Url, path_prefix: &str) -> Vec<Url> {
    let document = Html::parse_document(html);
    select_links(&document, base_url, path_prefix)
}

fn select_links(document: &Html, base_url: &Url, path_prefix: &str) -> Vec<Url> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .filter(|url| path_has_prefix(url, path_prefix))
        .collect()
}

/// Finds the "Next" pagination link
fn find_next_page(document: &Html, base_url: &Url) -> Option<Url> {
    let a_selector = Selector::parse("a[href]").ok()?;

    document.select(&a_selector).find_map(|element| {
        let text = element.text().collect::<String>();
        let text = text.trim().to_lowercase();
        if !NEXT_PAGE_TEXTS.contains(&text.as_str()) {
            return None;
        }
        resolve_link(element.value().attr("href")?, base_url)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/data/reaction/doi/10.1000/abc/start/0").unwrap()
    }

    #[test]
    fn test_extract_prefixed_links_in_order() {
        let html = r#"
            <html><body>
                <a href="/id/3">Details</a>
                <a href="/about">About</a>
                <a href="https://example.com/id/1">Details</a>
                <a href="/id/2">Details</a>
            </body></html>
        "#;
        let links = extract_links(html, &base_url(), "/id/");
        let paths: Vec<&str> = links.iter().map(Url::path).collect();
        assert_eq!(paths, vec!["/id/3", "/id/1", "/id/2"]);
    }

    #[test]
    fn test_no_matching_links_is_empty() {
        let html = r#"<html><body><a href="/about">About</a><p>No data</p></body></html>"#;
        assert!(extract_links(html, &base_url(), "/id/").is_empty());
    }

    #[test]
    fn test_duplicates_retained() {
        let html = r#"<a href="/id/1">a</a><a href="/id/1">b</a><a href="/id/2">c</a>"#;
        let links = extract_links(html, &base_url(), "/id/");
        let paths: Vec<&str> = links.iter().map(Url::path).collect();
        assert_eq!(paths, vec!["/id/1", "/id/1", "/id/2"]);
    }

    #[test]
    fn test_skip_special_links() {
        let html = r##"
            <a href="javascript:void(0)">js</a>
            <a href="mailto:x@example.com">mail</a>
            <a href="#top">top</a>
            <a>no href</a>
            <a href="/id/5">ok</a>
        "##;
        let links = extract_links(html, &base_url(), "/id/");
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_dataset_links_from_archive() {
        let html = r#"
            <ul>
              <li>Selenium dioxide, Riley 2024 <a href="/data/reaction/doi/10.1021/jacsau.4c01276/start/0">reaction data</a>
                  | <a href="https://doi.org/10.1021/jacsau.4c01276">DOI</a></li>
              <li>Suzuki coupling, Smith 2023 <a href="/data/reaction/doi/10.1039/d3sc01234a/start/0">reaction data</a></li>
            </ul>
        "#;
        let base = Url::parse("https://example.com/archive").unwrap();
        let links = extract_links(html, &base, "/data/reaction/doi/");
        assert_eq!(links.len(), 2);
        assert_eq!(
            links[0].as_str(),
            "https://example.com/data/reaction/doi/10.1021/jacsau.4c01276/start/0"
        );
    }

    #[test]
    fn test_parse_listing_finds_next_page() {
        let html = r#"
            <a href="/id/1">Details</a>
            <nav><a href="/data/reaction/doi/10.1000/abc/start/10"> Next </a></nav>
        "#;
        let listing = parse_listing(html, &base_url(), "/id/");
        assert_eq!(listing.links.len(), 1);
        assert_eq!(
            listing.next_page.unwrap().path(),
            "/data/reaction/doi/10.1000/abc/start/10"
        );
    }

    #[test]
    fn test_parse_listing_without_next_page() {
        let html = r#"<a href="/id/1">Details</a><a href="/prev">Previous</a>"#;
        let listing = parse_listing(html, &base_url(), "/id/");
        assert!(listing.next_page.is_none());
    }

    #[test]
    fn test_next_page_symbols() {
        for text in ["&gt;", "&raquo;", "NEXT"] {
            let html = format!(r#"<a href="/page/2">{text}</a>"#);
            let listing = parse_listing(&html, &base_url(), "/id/");
            assert_eq!(listing.next_page.unwrap().path(), "/page/2", "{text}");
        }
    }
}
