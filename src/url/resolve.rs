use url::Url;

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crd_scraper::url::resolve_link;
///
/// let base = Url::parse("https://example.com/data/reaction/doi/10.1/x").unwrap();
/// let url = resolve_link("/id/42", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/id/42");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
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

    let resolved = base_url.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}

/// Returns true if the URL's path starts with `prefix`
pub fn path_has_prefix(url: &Url, prefix: &str) -> bool {
    url.path().starts_with(prefix)
}
